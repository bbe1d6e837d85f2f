//! Camera rig following the airship.
//!
//! Two modes: a chase camera behind and above the airship, and an aim camera
//! hanging below the gondola looking straight down so the player can line up
//! a drop.

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use crate::config::CameraConfig;

/// Converts cgmath's OpenGL clip space (z in -1..1) to wgpu's (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    /// Chase or aim camera for an airship at `anchor`.
    pub fn follow(anchor: Vector3<f32>, aim_mode: bool, config: &CameraConfig) -> Self {
        if aim_mode {
            Self {
                eye: Point3::from_vec(anchor + config.aim_offset),
                forward: -Vector3::unit_y(),
                up: -Vector3::unit_z(),
            }
        } else {
            let eye = anchor + config.chase_offset;
            Self {
                eye: Point3::from_vec(eye),
                forward: (anchor - eye).normalize(),
                up: Vector3::unit_y(),
            }
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.eye, self.forward, self.up)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            aspect: config.aspect,
            fovy: Deg(config.fovy_degrees),
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Per-frame camera data in the layout the shaders read.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera, projection: &Projection) -> Self {
        Self {
            view_position: camera.eye.to_homogeneous().into(),
            view_proj: (projection.calc_matrix() * camera.view_matrix()).into(),
        }
    }
}
