use std::path::Path;

use crate::{config::TerrainConfig, data_structures::terrain::HeightField};

/**
 * This module contains the mesh generators and the logic for loading images
 * (textures and the height map) from external files.
 */
pub mod mesh;
pub mod texture;

/// Loads the height map at `path`. A missing or undecodable file is logged
/// and yields an empty field, which reports ground level 0 everywhere.
pub fn load_height_field(path: &Path, config: TerrainConfig) -> HeightField {
    match texture::load_image(path) {
        Ok(image) => {
            let field = HeightField::from_image(&image, config);
            let (width, height) = field.dimensions();
            log::info!("Loaded height map {} ({}x{})", path.display(), width, height);
            field
        }
        Err(e) => {
            log::warn!("Error loading height map {}: {:#}", path.display(), e);
            HeightField::empty(config)
        }
    }
}

/// Decodes an in-memory height map, falling back to an empty field.
pub fn height_field_from_bytes(bytes: &[u8], config: TerrainConfig) -> HeightField {
    match image::load_from_memory(bytes) {
        Ok(image) => HeightField::from_image(&image, config),
        Err(e) => {
            log::warn!("Error decoding height map: {}", e);
            HeightField::empty(config)
        }
    }
}
