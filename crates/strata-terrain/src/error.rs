//! Terrain generation error types.

use glam::UVec3;

/// Errors that can occur while generating terrain.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The requested grid dimension is outside the supported range.
    #[error("terrain size {size} outside supported range [{min}, {max}]")]
    InvalidSize {
        /// Requested size.
        size: u32,
        /// Smallest supported size.
        min: u32,
        /// Largest supported size.
        max: u32,
    },

    /// The noise field produced a non-finite value.
    #[error("noise sample at column ({x}, {z}) is not finite: {value}")]
    NoiseSample {
        /// Column x index.
        x: u32,
        /// Column z index.
        z: u32,
        /// The offending sample.
        value: f64,
    },

    /// A single voxel could not be placed in world space.
    #[error("voxel at grid {grid} cannot be placed in world space")]
    Placement {
        /// Grid coordinate `(x, y, z)` of the voxel.
        grid: UVec3,
    },

    /// The height map could not be turned into a preview image.
    #[error("height {height} at column ({x}, {z}) exceeds preview range 0..={max}")]
    Preview {
        /// Column x index.
        x: u32,
        /// Column z index.
        z: u32,
        /// Offending height.
        height: u32,
        /// Height mapped to full white.
        max: u32,
    },
}
