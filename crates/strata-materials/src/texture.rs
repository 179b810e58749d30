//! Texture handles and the sources that provide them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// MaterialError
// ---------------------------------------------------------------------------

/// Errors returned while loading material textures.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// The texture file exists but could not be read or decoded.
    #[error("failed to load texture {path}: {source}")]
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },
}

// ---------------------------------------------------------------------------
// TextureHandle
// ---------------------------------------------------------------------------

/// A decoded texture, cheap to clone and share across voxels.
#[derive(Clone)]
pub struct TextureHandle {
    name: String,
    image: Arc<image::RgbaImage>,
}

impl TextureHandle {
    /// Wrap an already decoded RGBA image under the given file name.
    pub fn new(name: impl Into<String>, image: image::RgbaImage) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
        }
    }

    /// File name the texture was loaded from, e.g. `grass.png`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The decoded pixels.
    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.image, &other.image)
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        f.debug_struct("TextureHandle")
            .field("name", &self.name)
            .field("size", &format_args!("{w}x{h}"))
            .finish()
    }
}

/// Textures serialize as their file name; pixel data stays with the renderer.
impl Serialize for TextureHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// TextureSource
// ---------------------------------------------------------------------------

/// Provides textures by file name.
///
/// `Ok(None)` means the asset does not exist, which is a normal condition.
/// `Err` is reserved for assets that exist but cannot be used.
pub trait TextureSource {
    /// Look up the texture stored under `file_name`.
    fn load(&self, file_name: &str) -> Result<Option<TextureHandle>, MaterialError>;
}

/// Loads textures from image files in a single directory.
#[derive(Clone, Debug)]
pub struct DirTextureSource {
    root: PathBuf,
}

impl DirTextureSource {
    /// Create a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextureSource for DirTextureSource {
    fn load(&self, file_name: &str) -> Result<Option<TextureHandle>, MaterialError> {
        let path = self.root.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }

        let image = image::open(&path)
            .map_err(|source| MaterialError::Decode {
                path: path.clone(),
                source,
            })?
            .to_rgba8();

        Ok(Some(TextureHandle::new(file_name, image)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let source = DirTextureSource::new(dir.path());
        assert!(source.load("grass.png").unwrap().is_none());
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([34, 139, 34, 255]));
        img.save(dir.path().join("grass.png")).unwrap();

        let source = DirTextureSource::new(dir.path());
        let handle = source.load("grass.png").unwrap().expect("texture should load");
        assert_eq!(handle.name(), "grass.png");
        assert_eq!(handle.dimensions(), (8, 4));
        assert_eq!(handle.image().get_pixel(0, 0).0, [34, 139, 34, 255]);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("snow.png"), b"definitely not a png").unwrap();

        let source = DirTextureSource::new(dir.path());
        let result = source.load("snow.png");
        assert!(matches!(result, Err(MaterialError::Decode { .. })));
    }

    #[test]
    fn test_handle_equality_is_by_identity() {
        let img = image::RgbaImage::new(2, 2);
        let a = TextureHandle::new("stone.png", img.clone());
        let b = TextureHandle::new("stone.png", img);
        assert_eq!(a, a.clone());
        assert_ne!(a, b, "separately loaded textures are distinct handles");
    }

    #[test]
    fn test_handle_serializes_as_name() {
        let handle = TextureHandle::new("dirt.png", image::RgbaImage::new(1, 1));
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"dirt.png\"");
    }
}
