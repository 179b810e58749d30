//! Discrete column heights sampled from a noise field.

use crate::error::TerrainError;
use crate::noise_field::{NoiseField, NoiseSource};

/// Maximum number of voxel layers in a column.
pub const MAX_LAYERS: u32 = 8;
/// Minimum number of voxel layers in a column.
pub const BASE_LAYERS: u32 = 2;

/// Smallest supported grid dimension.
pub const MIN_TERRAIN_SIZE: u32 = 32;
/// Largest supported grid dimension.
pub const MAX_TERRAIN_SIZE: u32 = 256;
/// Grid dimension used when the caller supplies nothing usable.
pub const DEFAULT_TERRAIN_SIZE: u32 = 64;

/// Validated grid dimension `N` of an `N x N` terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerrainSize(u32);

impl TerrainSize {
    /// Validate `size` against `[MIN_TERRAIN_SIZE, MAX_TERRAIN_SIZE]`.
    pub fn new(size: u32) -> Result<Self, TerrainError> {
        if (MIN_TERRAIN_SIZE..=MAX_TERRAIN_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(TerrainError::InvalidSize {
                size,
                min: MIN_TERRAIN_SIZE,
                max: MAX_TERRAIN_SIZE,
            })
        }
    }

    /// Clamp `size` into the supported range.
    pub fn clamped(size: u32) -> Self {
        Self(size.clamp(MIN_TERRAIN_SIZE, MAX_TERRAIN_SIZE))
    }

    /// The grid dimension.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Noise coordinate scale: larger maps sample the field more smoothly.
    pub fn noise_scale(self) -> f64 {
        f64::from(self.0) / 3.0
    }
}

impl Default for TerrainSize {
    fn default() -> Self {
        Self(DEFAULT_TERRAIN_SIZE)
    }
}

/// Number of cells in a `size x size` grid.
pub(crate) fn cell_count(size: u32) -> usize {
    size as usize * size as usize
}

/// Row-major index of column `(x, z)` in a grid of width `size`.
pub(crate) fn cell_index(size: u32, x: u32, z: u32) -> usize {
    x as usize * size as usize + z as usize
}

/// Square grid of column heights.
///
/// Stored row-major with `x` as the row and `z` as the column, so the cell
/// for column `(x, z)` lives at index `x * size + z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    size: u32,
    cells: Vec<u32>,
}

impl HeightMap {
    /// Build a map by evaluating `f(x, z)` for every column.
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let mut cells = Vec::with_capacity(cell_count(size));
        for x in 0..size {
            for z in 0..size {
                cells.push(f(x, z));
            }
        }
        Self { size, cells }
    }

    /// Build a map where every column has the same height.
    pub fn filled(size: u32, height: u32) -> Self {
        Self {
            size,
            cells: vec![height; cell_count(size)],
        }
    }

    /// Grid dimension.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Height of column `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= size` or `z >= size`.
    pub fn get(&self, x: u32, z: u32) -> u32 {
        assert!(x < self.size && z < self.size, "column ({x}, {z}) out of bounds");
        self.cells[cell_index(self.size, x, z)]
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Iterate `(x, z, height)` in row-major order.
    pub fn columns(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &h)| (i as u32 / size, i as u32 % size, h))
    }

    /// Sum of all column heights, i.e. the number of voxels in the terrain.
    pub fn total_voxels(&self) -> u64 {
        self.cells.iter().map(|&h| u64::from(h)).sum()
    }

    /// Returns `(min, max)` column height, or `None` for an empty map.
    pub fn height_range(&self) -> Option<(u32, u32)> {
        let min = self.cells.iter().copied().min()?;
        let max = self.cells.iter().copied().max()?;
        Some((min, max))
    }
}

/// Map a noise sample in `[-1, 1]` to a column height in `[BASE_LAYERS, MAX_LAYERS]`.
pub fn column_height(noise: f64) -> u32 {
    let raw = ((noise + 1.0) * f64::from(MAX_LAYERS) / 2.0).round();
    (raw.max(0.0) as u32).clamp(BASE_LAYERS, MAX_LAYERS)
}

/// Builds [`HeightMap`]s from a [`NoiseSource`].
pub struct HeightMapGenerator<N = NoiseField> {
    noise: N,
}

impl<N: NoiseSource> HeightMapGenerator<N> {
    /// Create a generator sampling `noise`.
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Generate the height map for a `size x size` grid.
    ///
    /// Fails on the first non-finite noise sample; no partial map is returned.
    pub fn generate(&self, size: TerrainSize) -> Result<HeightMap, TerrainError> {
        let n = size.get();
        let scale = size.noise_scale();
        tracing::info!("Generating {n}x{n} height map");

        let mut cells = Vec::with_capacity((n * n) as usize);
        for x in 0..n {
            for z in 0..n {
                let value = self.noise.sample(f64::from(x) / scale, f64::from(z) / scale);
                if !value.is_finite() {
                    tracing::error!("Height map generation failed at column ({x}, {z})");
                    return Err(TerrainError::NoiseSample { x, z, value });
                }
                cells.push(column_height(value));
            }
        }

        tracing::info!("Height map complete");
        Ok(HeightMap { size: n, cells })
    }
}

impl Default for HeightMapGenerator<NoiseField> {
    fn default() -> Self {
        Self::new(NoiseField::default())
    }
}
