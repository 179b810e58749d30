//! Bounded voxel terrain generation: fBm noise, discrete column heights,
//! layered material assignment, and voxel placement emission.

mod builder;
mod error;
mod heightmap;
mod layers;
mod noise_field;
mod preview;

pub use builder::{BuildStats, Terrain, TerrainBuilder, VoxelPlacement};
pub use error::TerrainError;
pub use heightmap::{
    BASE_LAYERS, DEFAULT_TERRAIN_SIZE, HeightMap, HeightMapGenerator, MAX_LAYERS,
    MAX_TERRAIN_SIZE, MIN_TERRAIN_SIZE, TerrainSize,
};
pub use layers::resolve_material;
pub use noise_field::{ConstantNoise, NoiseField, NoiseParams, NoiseSource};
pub use preview::PreviewImage;
