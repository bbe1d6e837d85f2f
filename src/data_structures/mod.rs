//! Engine data structures: meshes, instances, scene graphs and terrain.
//!
//! - `model` contains vertices, meshes, materials and the mesh arena
//! - `instance` holds per-draw transformation data
//! - `scene_graph` composes hierarchical objects into flat draw lists
//! - `terrain` is the height field used for ground collision and displacement

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod terrain;
