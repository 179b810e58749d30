//! Appearance table: resolves each [`MaterialId`] to a texture and a color.
//!
//! The table is built once per run from a [`TextureSource`] and then shared
//! read-only by every voxel resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::material::{Color, MaterialId};
use crate::texture::{TextureHandle, TextureSource};

/// How the color of a textured material is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TintPolicy {
    /// Textured materials keep their fallback color.
    #[default]
    FallbackColor,
    /// Textured materials use white so the texture shows untinted.
    WhiteUnderTexture,
}

impl TintPolicy {
    fn color_for(self, material: MaterialId, textured: bool) -> Color {
        match self {
            Self::WhiteUnderTexture if textured => Color::WHITE,
            _ => material.fallback_color(),
        }
    }
}

/// Resolved visual representation of a material.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Appearance {
    /// Texture, if the asset was found.
    pub texture: Option<TextureHandle>,
    /// Always present, even when a texture is set.
    pub color: Color,
}

impl Appearance {
    /// Appearance with no texture and the material's fallback color.
    pub fn fallback(material: MaterialId) -> Self {
        Self {
            texture: None,
            color: material.fallback_color(),
        }
    }

    /// Returns `true` if a texture is attached.
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}

/// Immutable mapping from every [`MaterialId`] to its [`Appearance`].
#[derive(Clone, Debug)]
pub struct AppearanceTable {
    /// Dense array: index == `MaterialId::index()`.
    entries: [Appearance; MaterialId::COUNT],
}

impl AppearanceTable {
    /// Load textures for every material from `source`.
    ///
    /// Missing textures are logged as warnings and unreadable ones as errors;
    /// in both cases the material falls back to its color. Materials sharing a
    /// texture file only load it once.
    pub fn load(source: &impl TextureSource, policy: TintPolicy) -> Self {
        tracing::info!("Loading material textures");
        let mut cache: HashMap<&'static str, Option<TextureHandle>> = HashMap::new();

        let entries = MaterialId::ALL.map(|material| {
            let texture = cache
                .entry(material.visual_name())
                .or_insert_with(|| load_one(source, material))
                .clone();
            let color = policy.color_for(material, texture.is_some());
            Appearance { texture, color }
        });

        let table = Self { entries };
        tracing::info!(
            "Material textures ready: {}/{} textured",
            table.loaded_materials().count(),
            MaterialId::COUNT
        );
        table
    }

    /// Table with no textures at all: every material uses its fallback color.
    pub fn colors_only() -> Self {
        Self::from_fn(Appearance::fallback)
    }

    /// Build a table from an explicit appearance per material.
    pub fn from_fn(f: impl FnMut(MaterialId) -> Appearance) -> Self {
        Self {
            entries: MaterialId::ALL.map(f),
        }
    }

    /// Appearance for `material`.
    pub fn resolve(&self, material: MaterialId) -> &Appearance {
        &self.entries[material.index()]
    }

    /// Returns `true` if `material` has a texture.
    pub fn has_texture(&self, material: MaterialId) -> bool {
        self.resolve(material).is_textured()
    }

    /// Materials that resolved to a texture, in index order.
    pub fn loaded_materials(&self) -> impl Iterator<Item = MaterialId> + '_ {
        MaterialId::ALL
            .into_iter()
            .filter(|&m| self.has_texture(m))
    }
}

impl Default for AppearanceTable {
    fn default() -> Self {
        Self::colors_only()
    }
}

fn load_one(source: &impl TextureSource, material: MaterialId) -> Option<TextureHandle> {
    let file_name = material.texture_file_name();
    match source.load(&file_name) {
        Ok(Some(texture)) => {
            tracing::info!("Loaded texture {file_name}");
            Some(texture)
        }
        Ok(None) => {
            tracing::warn!("Missing texture {file_name}, using fallback color for {material}");
            None
        }
        Err(e) => {
            tracing::error!("Texture error for {material}: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
