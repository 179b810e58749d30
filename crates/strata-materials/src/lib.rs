//! Voxel materials: the closed [`MaterialId`] set, fallback colors, texture loading,
//! and the per-run [`AppearanceTable`].

mod appearance;
mod material;
mod texture;

pub use appearance::{Appearance, AppearanceTable, TintPolicy};
pub use material::{Color, MaterialId};
pub use texture::{DirTextureSource, MaterialError, TextureHandle, TextureSource};
