//! Tunables for terrain, physics, flight and the camera.
//!
//! Every struct implements [`Default`] with the values the game ships with;
//! tests and the headless binary override individual fields.

use cgmath::Vector3;

/// World-space footprint of the height field and the terrain grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    /// Side length of the unscaled terrain square.
    pub base_extent: f32,
    /// Horizontal scale applied to the terrain when it is drawn.
    pub scale: f32,
    /// Elevation of a fully white height map pixel.
    pub height_scale: f32,
    pub grid_width: u32,
    pub grid_depth: u32,
    /// UV multiplier so the ground texture repeats across the grid.
    pub uv_tiling: f32,
}

impl TerrainConfig {
    /// Side length of the terrain square in world units.
    pub fn world_size(&self) -> f32 {
        self.base_extent * self.scale
    }

    pub fn half_extent(&self) -> f32 {
        self.world_size() / 2.0
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_extent: 100.0,
            scale: 2.0,
            height_scale: 10.0,
            grid_width: 100,
            grid_depth: 100,
            uv_tiling: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Constant velocity every parcel gets at spawn.
    pub gravity: Vector3<f32>,
    pub parcel_radius: f32,
    pub target_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, -9.8, 0.0),
            parcel_radius: 0.5,
            target_radius: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightConfig {
    pub start: Vector3<f32>,
    /// Units per second along every axis.
    pub speed: f32,
    /// Where a parcel appears relative to the airship.
    pub drop_offset: Vector3<f32>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            start: Vector3::new(0.0, 30.0, 0.0),
            speed: 15.0,
            drop_offset: Vector3::new(0.0, -4.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub chase_offset: Vector3<f32>,
    pub aim_offset: Vector3<f32>,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            chase_offset: Vector3::new(0.0, 10.0, 20.0),
            aim_offset: Vector3::new(0.0, -6.0, 0.0),
            fovy_degrees: 60.0,
            aspect: 800.0 / 600.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneConfig {
    pub terrain: TerrainConfig,
    pub physics: PhysicsConfig,
    pub flight: FlightConfig,
    pub camera: CameraConfig,
}
