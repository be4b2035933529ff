//! The scene, independent of how it gets drawn.

pub mod body;
pub mod catalog;
mod scene_graph;
mod solar_system;

pub use body::{Body, BodyID, BodyInfo, Ring};
pub use scene_graph::{Node, NodeID, NodeKind, SceneGraph};
pub use solar_system::{orbit_increment, BodyNodes, SolarSystem, MIN_ELAPSED_MS};
