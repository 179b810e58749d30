//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_materials::TintPolicy;
use strata_terrain::DEFAULT_TERRAIN_SIZE;

use crate::error::ConfigError;

/// File name of the persisted config.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain generation settings.
    pub terrain: TerrainConfig,
    /// Asset and output locations.
    pub assets: AssetConfig,
    /// Voxel appearance settings.
    pub appearance: AppearanceConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid dimension. Clamped to the supported range before use.
    pub size: u32,
    /// Noise seed.
    pub seed: u32,
}

/// Asset and output locations. `None` means "next to the data directory".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding `{material}.png` textures.
    pub texture_dir: Option<PathBuf>,
    /// Where the grayscale height map preview is written.
    pub preview_path: Option<PathBuf>,
    /// Where placements are exported as JSON. No export when unset.
    pub export_path: Option<PathBuf>,
}

/// Voxel appearance configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Color policy for textured materials.
    pub tint: TintPolicy,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write a log file into the log directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_TERRAIN_SIZE,
            seed: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

// --- Load / Save ---

/// How [`Config::load_or_create`] obtained its config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written to this path.
    Created(PathBuf),
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(path) => write!(f, "Loaded config from {}", path.display()),
            Self::Created(path) => write!(f, "Created default config at {}", path.display()),
        }
    }
}

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Load config from the given directory, or create a default config file.
    ///
    /// Does not log; the caller reports the returned [`ConfigOrigin`].
    pub fn load_or_create(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let path = Self::path_in(config_dir);

        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
            Ok((config, ConfigOrigin::Loaded(path)))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created(path)))
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path_in(config_dir);
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&path, serialized).map_err(write_err)
    }
}
