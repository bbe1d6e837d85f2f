//! Error types for geometry construction and entity creation.
//!
//! Asset loading has no error type here: missing or corrupt images
//! degrade to placeholder data (see [`crate::resources`]) instead of failing.

use thiserror::Error;

/// A mesh generator was called with parameters that cannot describe a solid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{primitive} needs at least {min} {what}, got {got}")]
    TooFewSubdivisions {
        primitive: &'static str,
        what: &'static str,
        min: u32,
        got: u32,
    },

    #[error("{primitive} {name} must be a positive finite number, got {value}")]
    InvalidDimension {
        primitive: &'static str,
        name: &'static str,
        value: f32,
    },

    #[error("{primitive} would need more vertices than 32-bit indices can address")]
    TooManyVertices { primitive: &'static str },
}

/// An entity was constructed with values the simulation cannot handle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("collision radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),

    #[error("{what} must be finite, got ({x}, {y}, {z})")]
    NonFinite {
        what: &'static str,
        x: f32,
        y: f32,
        z: f32,
    },
}

/// Umbrella error for building a whole scene.
#[derive(Debug, Error)]
pub enum Error {
    #[error("geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("simulation: {0}")]
    Simulation(#[from] SimulationError),
}

pub type Result<T> = std::result::Result<T, Error>;
