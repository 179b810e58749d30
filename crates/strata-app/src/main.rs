//! The `strata` binary: generates one terrain and writes its artifacts.

mod output;
mod platform;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use strata_config::{CliArgs, Config};
use strata_materials::{AppearanceTable, DirTextureSource};
use strata_terrain::{NoiseField, TerrainBuilder, TerrainError, TerrainSize};

use crate::output::OutputError;
use crate::platform::PlatformDirs;

/// Failures that end the run.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("terrain build failed: {0}")]
    Terrain(#[from] TerrainError),

    #[error("placement export failed: {0}")]
    Export(#[source] OutputError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = PlatformDirs::resolve().unwrap_or_else(|e| {
        eprintln!("{e}, using the working directory");
        PlatformDirs::resolve_with_root(Path::new("."))
    });
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create application directories: {e}");
    }
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    let (mut config, loaded) = match Config::load_or_create(&config_dir) {
        Ok((config, origin)) => (config, Ok(origin)),
        Err(e) => (Config::default(), Err(e)),
    };
    config.apply_log_overrides(&args);

    strata_log::init_logging(Some(&dirs.log_dir), config.debug.log_to_file, Some(&config));
    tracing::info!("strata starting");
    match loaded {
        Ok(origin) => tracing::info!("{origin}"),
        Err(e) => tracing::warn!("Failed to load config: {e}, using defaults"),
    }

    config.apply_cli_overrides(&args);

    match run(&config, &dirs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, dirs: &PlatformDirs) -> Result<(), AppError> {
    let requested = config.terrain.size;
    let size = TerrainSize::new(requested).unwrap_or_else(|e| {
        tracing::warn!("{e}, clamping");
        TerrainSize::clamped(requested)
    });
    let n = size.get();
    tracing::info!("Terrain size {n}x{n}, seed {}", config.terrain.seed);

    let texture_dir = config
        .assets
        .texture_dir
        .clone()
        .unwrap_or_else(|| dirs.texture_dir());
    let appearance = AppearanceTable::load(
        &DirTextureSource::new(texture_dir),
        config.appearance.tint,
    );

    let builder = TerrainBuilder::new(NoiseField::with_seed(config.terrain.seed), &appearance);
    let terrain = builder.build(size)?;

    if let Some(preview) = &terrain.preview {
        let path = config
            .assets
            .preview_path
            .clone()
            .unwrap_or_else(|| dirs.preview_path());
        match output::write_preview(preview, &path) {
            Ok(()) => tracing::info!("Height map preview saved to {}", path.display()),
            Err(e) => tracing::error!("Failed to save height map preview: {e}"),
        }
    }

    if let Some(path) = &config.assets.export_path {
        output::export_placements(&terrain, config.terrain.seed, path).map_err(AppError::Export)?;
        tracing::info!(
            "Exported {} placements to {}",
            terrain.placements.len(),
            path.display()
        );
    }

    Ok(())
}
