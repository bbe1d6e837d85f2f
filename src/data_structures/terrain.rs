//! Height field shared by the physics ground test and terrain displacement.
//!
//! The field is a square of `base_extent * scale` world units centred on the
//! origin. Lookups use the nearest sample (no interpolation), so the ground
//! is stepped at the resolution of the source image.

use image::DynamicImage;

use crate::config::TerrainConfig;

fn normalized(sample: f32) -> f32 {
    if sample.is_finite() { sample.clamp(0.0, 1.0) } else { 0.0 }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    /// Row-major, normalized to [0, 1].
    samples: Vec<f32>,
    config: TerrainConfig,
}

impl HeightField {
    /// A field that answers 0 everywhere. Used when the height map is missing.
    pub fn empty(config: TerrainConfig) -> Self {
        Self {
            width: 0,
            height: 0,
            samples: Vec::new(),
            config,
        }
    }

    /// A single-sample field with the same normalized elevation everywhere
    /// inside the footprint.
    pub fn flat(level: f32, config: TerrainConfig) -> Self {
        Self {
            width: 1,
            height: 1,
            samples: vec![normalized(level)],
            config,
        }
    }

    /// Builds a field from row-major samples. Values are clamped to [0, 1] and
    /// non-finite values read as 0; a size mismatch yields an empty field.
    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>, config: TerrainConfig) -> Self {
        if samples.len() != (width as usize) * (height as usize) {
            log::warn!(
                "height field of {}x{} got {} samples, falling back to flat ground",
                width,
                height,
                samples.len()
            );
            return Self::empty(config);
        }
        let samples = samples.into_iter().map(normalized).collect();
        Self {
            width,
            height,
            samples,
            config,
        }
    }

    /// Reads the red channel of `image` as elevation.
    pub fn from_image(image: &DynamicImage, config: TerrainConfig) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let samples = rgb.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
        Self {
            width,
            height,
            samples,
            config,
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Normalized field coordinates of a world position, or `None` when the
    /// position is on or beyond the footprint's edge.
    pub fn uv(&self, world_x: f32, world_z: f32) -> Option<(f32, f32)> {
        let size = self.config.world_size();
        let half = size / 2.0;
        // Written so NaN falls through to `None`.
        if !(world_x.abs() < half && world_z.abs() < half) {
            return None;
        }
        Some(((world_x + half) / size, (world_z + half) / size))
    }

    /// Ground elevation at a world position.
    pub fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let Some((u, v)) = self.uv(world_x, world_z) else {
            return 0.0;
        };
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.samples[(y * self.width + x) as usize] * self.config.height_scale
    }
}
