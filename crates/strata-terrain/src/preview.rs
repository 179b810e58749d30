//! Grayscale preview of a height map.

use crate::error::TerrainError;
use crate::heightmap::{HeightMap, MAX_LAYERS, cell_index};

/// Single-channel 8-bit image, one pixel per column.
///
/// Pixels share the height map's addressing: row `x`, column `z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    size: u32,
    pixels: Vec<u8>,
}

impl PreviewImage {
    /// Scale every column height linearly so that `MAX_LAYERS` maps to 255.
    ///
    /// Fails if a column is taller than `MAX_LAYERS`.
    pub fn from_height_map(map: &HeightMap) -> Result<Self, TerrainError> {
        let max = MAX_LAYERS;
        let pixels = map
            .columns()
            .map(|(x, z, height)| {
                if height > max {
                    return Err(TerrainError::Preview { x, z, height, max });
                }
                Ok((f64::from(height) / f64::from(max) * 255.0).round() as u8)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            size: map.size(),
            pixels,
        })
    }

    /// Width and height in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Pixel for column `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= size` or `z >= size`.
    pub fn get(&self, x: u32, z: u32) -> u8 {
        assert!(x < self.size && z < self.size, "pixel ({x}, {z}) out of bounds");
        self.pixels[cell_index(self.size, x, z)]
    }

    /// Row-major pixel buffer, `size * size` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
