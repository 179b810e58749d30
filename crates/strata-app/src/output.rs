//! Writers for build artifacts: the preview PNG and the placement export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use strata_terrain::{PreviewImage, Terrain, VoxelPlacement};

/// Errors returned while writing build artifacts.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON encoding failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `preview` as an 8-bit grayscale PNG, creating parent directories.
pub fn write_preview(preview: &PreviewImage, path: &Path) -> Result<(), OutputError> {
    create_parent(path)?;
    let size = preview.size();
    image::save_buffer(path, preview.pixels(), size, size, image::ColorType::L8)?;
    Ok(())
}

#[derive(Serialize)]
struct Export<'a> {
    size: u32,
    seed: u32,
    voxel_count: usize,
    placements: &'a [VoxelPlacement],
}

/// Write every placement of `terrain` as a JSON document.
pub fn export_placements(terrain: &Terrain, seed: u32, path: &Path) -> Result<(), OutputError> {
    create_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    let export = Export {
        size: terrain.height_map.size(),
        seed,
        voxel_count: terrain.placements.len(),
        placements: &terrain.placements,
    };
    serde_json::to_writer(&mut writer, &export)?;
    writer.flush()?;
    Ok(())
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
