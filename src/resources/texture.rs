use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{DynamicImage, RgbaImage};

use crate::data_structures::model::TextureHandle;

/// Pixel data of a loaded texture, ready to be handed to the renderer.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub name: String,
    pub pixels: RgbaImage,
    /// Whether the sampler should repeat (`true`) or clamp to the edge.
    pub repeat: bool,
}

/**
 * Owns every texture image the scene asked for and hands out stable handles.
 *
 * Handle `n` refers to the `n`-th successfully loaded image (1-based); a load
 * failure is logged and answered with [`TextureHandle::PLACEHOLDER`] so the scene
 * keeps running with untextured geometry.
 */
#[derive(Debug, Default)]
pub struct TextureRegistry {
    images: Vec<TextureImage>,
    root: Option<PathBuf>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry resolving relative file names against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            images: Vec::new(),
            root: Some(root.into()),
        }
    }

    fn resolve(&self, file_name: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Loads `file_name`, returning the placeholder handle if it can't be read.
    pub fn load(&mut self, file_name: &str, repeat: bool) -> TextureHandle {
        let path = self.resolve(file_name);
        match load_image(&path) {
            Ok(image) => self.insert(file_name, image, repeat),
            Err(e) => {
                log::warn!("Failed to load texture {}: {:#}", path.display(), e);
                TextureHandle::PLACEHOLDER
            }
        }
    }

    /// Decodes an in-memory image, returning the placeholder handle on failure.
    pub fn load_from_bytes(&mut self, name: &str, bytes: &[u8], repeat: bool) -> TextureHandle {
        match image::load_from_memory(bytes) {
            Ok(image) => self.insert(name, image, repeat),
            Err(e) => {
                log::warn!("Failed to decode texture {}: {}", name, e);
                TextureHandle::PLACEHOLDER
            }
        }
    }

    pub fn insert(&mut self, name: &str, image: DynamicImage, repeat: bool) -> TextureHandle {
        self.images.push(TextureImage {
            name: name.to_string(),
            pixels: image.to_rgba8(),
            repeat,
        });
        TextureHandle(self.images.len() as u32)
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&TextureImage> {
        if handle.is_placeholder() {
            return None;
        }
        self.images.get(handle.0 as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

pub fn load_image(path: &Path) -> anyhow::Result<DynamicImage> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(image)
}
