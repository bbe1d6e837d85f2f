use std::io::Cursor;

use airdrop::{
    config::TerrainConfig,
    data_structures::{model::Material, terrain::HeightField},
    resources::{self, mesh},
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::common::test_utils::*;

mod common;

/// 4x4 field where sample `k` (row-major) has elevation `k / 15`.
fn ramp() -> HeightField {
    let samples = (0..16).map(|k| k as f32 / 15.0).collect();
    HeightField::from_samples(4, 4, samples, TerrainConfig::default())
}

#[test]
fn sample_picks_the_nearest_pixel() {
    let field = ramp();
    // footprint is 200 units wide, so each pixel covers 50 units
    assert_close(field.sample(-75.0, -75.0), 0.0);
    assert_close(field.sample(25.0, -75.0), 2.0 / 15.0 * 10.0);
    assert_close(field.sample(-75.0, 25.0), 8.0 / 15.0 * 10.0);
    assert_close(field.sample(99.0, 99.0), 10.0);
    // no interpolation inside a pixel
    assert_eq!(field.sample(0.1, 0.1), field.sample(49.9, 49.9));
}

#[test]
fn sample_is_idempotent() {
    let field = ramp();
    for &(x, z) in &[(0.0, 0.0), (-33.3, 12.5), (99.99, -99.99), (150.0, 0.0)] {
        assert_eq!(field.sample(x, z).to_bits(), field.sample(x, z).to_bits());
    }
}

#[test]
fn sample_is_zero_on_and_beyond_the_edge() {
    let field = HeightField::flat(1.0, TerrainConfig::default());
    assert_eq!(field.sample(0.0, 0.0), 10.0);
    let half = TerrainConfig::default().half_extent();
    assert_eq!(half, 100.0);
    for &(x, z) in &[
        (half, 0.0),
        (-half, 0.0),
        (0.0, half),
        (0.0, -half),
        (half + 0.01, 0.0),
        (1.0e6, -1.0e6),
        (f32::NAN, 0.0),
        (0.0, f32::INFINITY),
    ] {
        assert_eq!(field.sample(x, z), 0.0, "at ({}, {})", x, z);
    }
    assert!(field.sample(half - 0.01, half - 0.01) > 0.0);
}

#[test]
fn footprint_follows_the_terrain_scale() {
    let config = TerrainConfig {
        scale: 0.5,
        height_scale: 4.0,
        ..Default::default()
    };
    let field = HeightField::flat(0.5, config);
    assert_eq!(field.sample(24.0, 0.0), 2.0);
    assert_eq!(field.sample(26.0, 0.0), 0.0);
}

#[test]
fn empty_field_reports_zero_everywhere() {
    let field = HeightField::empty(TerrainConfig::default());
    assert!(field.is_empty());
    assert_eq!(field.sample(0.0, 0.0), 0.0);
    assert_eq!(field.sample(-50.0, 70.0), 0.0);

    // mismatched sample count degrades the same way
    let field = HeightField::from_samples(3, 3, vec![1.0; 4], TerrainConfig::default());
    assert!(field.is_empty());
}

#[test]
fn image_red_channel_is_the_elevation() {
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([0, 200, 200]));
    img.put_pixel(1, 0, Rgb([255, 0, 0]));
    img.put_pixel(0, 1, Rgb([51, 0, 0]));
    img.put_pixel(1, 1, Rgb([102, 9, 9]));
    let field = HeightField::from_image(&DynamicImage::ImageRgb8(img), TerrainConfig::default());

    assert_eq!(field.dimensions(), (2, 2));
    assert_close(field.sample(-50.0, -50.0), 0.0);
    assert_close(field.sample(50.0, -50.0), 10.0);
    assert_close(field.sample(-50.0, 50.0), 2.0);
    assert_close(field.sample(50.0, 50.0), 4.0);
}

#[test]
fn height_map_loading_degrades_to_flat_ground() {
    init_logger();
    let field = resources::load_height_field(
        std::path::Path::new("does/not/exist/heightmap.jpg"),
        TerrainConfig::default(),
    );
    assert!(field.is_empty());
    assert_eq!(field.sample(10.0, 10.0), 0.0);

    let field = resources::height_field_from_bytes(b"not an image", TerrainConfig::default());
    assert!(field.is_empty());
}

#[test]
fn height_map_decodes_from_png_bytes() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let field = resources::height_field_from_bytes(&bytes, TerrainConfig::default());
    assert_eq!(field.dimensions(), (8, 8));
    assert_close(field.sample(0.0, 0.0), 10.0);
}

#[test]
fn terrain_grid_and_height_query_address_the_same_texel() {
    let config = TerrainConfig::default();
    let field = ramp();
    let terrain = mesh::terrain_tiled(
        config.grid_width,
        config.grid_depth,
        config.uv_tiling,
        Material::default(),
    )
    .unwrap();

    for v in terrain.vertices.iter().step_by(37) {
        let world_x = v.position[0] * config.scale;
        let world_z = v.position[2] * config.scale;
        let Some((u, w)) = field.uv(world_x, world_z) else {
            // edge vertices sit exactly on the footprint boundary
            assert!(world_x.abs() >= config.half_extent() || world_z.abs() >= config.half_extent());
            continue;
        };
        assert_close(u, v.tex_coords[0] / config.uv_tiling);
        assert_close(w, v.tex_coords[1] / config.uv_tiling);
    }
}

#[test]
fn non_finite_samples_read_as_ground_level() {
    let samples = vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 2.0];
    let field = HeightField::from_samples(2, 2, samples, TerrainConfig::default());
    assert_eq!(field.sample(-50.0, -50.0), 0.0);
    assert_eq!(field.sample(50.0, -50.0), 0.0);
    assert_eq!(field.sample(-50.0, 50.0), 0.0);
    assert_eq!(field.sample(50.0, 50.0), 10.0);

    let field = HeightField::flat(f32::NAN, TerrainConfig::default());
    assert_eq!(field.sample(0.0, 0.0), 0.0);
}
