//! Core material types: [`MaterialId`] and [`Color`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Linear RGBA color. Each component is in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Opaque white. Used to show a texture without tinting it.
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    /// Create an opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }
}

// ---------------------------------------------------------------------------
// MaterialId
// ---------------------------------------------------------------------------

/// Material assigned to a single terrain voxel.
///
/// `Bedrock` and `StoneCap` come from different layering rules but share the
/// `stone` visual (same texture file, same fallback color).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialId {
    /// The two base layers of every column.
    Bedrock,
    /// Layers between the base and the cap.
    Fill,
    /// Cap of low columns.
    Grass,
    /// Cap of mid-elevation columns.
    StoneCap,
    /// Cap of the highest columns.
    Snow,
}

impl MaterialId {
    /// Number of material variants.
    pub const COUNT: usize = 5;

    /// All materials, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Bedrock,
        Self::Fill,
        Self::Grass,
        Self::StoneCap,
        Self::Snow,
    ];

    /// Dense index in `0..COUNT`, matching the position in [`MaterialId::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Bedrock => 0,
            Self::Fill => 1,
            Self::Grass => 2,
            Self::StoneCap => 3,
            Self::Snow => 4,
        }
    }

    /// Name of the visual this material renders with.
    pub const fn visual_name(self) -> &'static str {
        match self {
            Self::Bedrock | Self::StoneCap => "stone",
            Self::Fill => "dirt",
            Self::Grass => "grass",
            Self::Snow => "snow",
        }
    }

    /// Texture file looked up for this material, e.g. `grass.png`.
    pub fn texture_file_name(self) -> String {
        format!("{}.png", self.visual_name())
    }

    /// Color used when no texture is available.
    pub const fn fallback_color(self) -> Color {
        match self {
            Self::Bedrock | Self::StoneCap => Color::rgb(0.5, 0.5, 0.5),
            Self::Fill => Color::rgb(0.545, 0.27, 0.075),
            Self::Grass => Color::rgb(0.133, 0.545, 0.133),
            Self::Snow => Color::rgb(1.0, 0.98, 0.98),
        }
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bedrock => "bedrock",
            Self::Fill => "fill",
            Self::Grass => "grass",
            Self::StoneCap => "stone_cap",
            Self::Snow => "snow",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
