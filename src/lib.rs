//! airdrop
//!
//! Geometry and simulation core of a small delivery game: an airship flies
//! over height-mapped terrain and drops parcels onto houses. This crate builds
//! every mesh procedurally, answers terrain height queries, simulates falling
//! parcels and composes the scene into a flat draw list per frame. Windowing,
//! input polling and GPU submission are left to the embedding application.
//!
//! High-level modules
//! - `camera`: chase/aim camera rig and the view-projection uniform
//! - `config`: tunables for terrain, physics, flight and camera
//! - `data_structures`: meshes, instances, scene graph blueprints, height field
//! - `error`: construction-time error types
//! - `flow`: the per-frame controller producing draw lists for a renderer
//! - `resources`: procedural mesh generators and image loading
//! - `simulation`: parcel kinematics, ground impact and target hits
//!

pub mod camera;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod resources;
pub mod simulation;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use error::{Error, GeometryError, Result, SimulationError};
