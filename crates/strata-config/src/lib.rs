//! Configuration for strata.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, TintArg, parse_terrain_size};
pub use config::{
    AppearanceConfig, AssetConfig, CONFIG_FILE_NAME, Config, ConfigOrigin, DebugConfig,
    TerrainConfig,
};
pub use error::ConfigError;
