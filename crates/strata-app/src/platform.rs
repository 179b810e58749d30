//! Platform directory resolution.
//!
//! Resolves where config, assets, generated output and logs live, following
//! OS conventions (XDG on Linux, Known Folders on Windows, Library on macOS).

use std::path::{Path, PathBuf};

/// Errors that can occur during platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// An I/O error occurred (e.g., directory creation failed).
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// OS-specific directory paths for strata.
#[derive(Clone, Debug)]
pub struct PlatformDirs {
    /// User configuration: `config.ron`.
    pub config_dir: PathBuf,
    /// Assets and generated output.
    pub data_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "strata";

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);

        let data_dir = dirs::data_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("data"));

        Ok(Self {
            log_dir: app_config.join("logs"),
            config_dir: app_config,
            data_dir,
        })
    }

    /// Resolve directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Default texture directory: `<data>/textures`.
    pub fn texture_dir(&self) -> PathBuf {
        self.data_dir.join("textures")
    }

    /// Default preview location: `<data>/heightmap/heightmap.png`.
    pub fn preview_path(&self) -> PathBuf {
        self.data_dir.join("heightmap").join("heightmap.png")
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
