//! # Naos Core
//!
//! Foundation crate for the naos scene toolkit:
//! - **Math**: bounding boxes, interpolation, and easing curves
//! - **Scene Graph**: hierarchical transforms, per-node mesh geometry,
//!   world bounding queries, and subtree detachment

pub mod math;
pub mod scene;

pub use math::{Aabb, Easing, lerp, smoothstep};
pub use scene::{MeshGeometry, Node, NodeId, SceneGraph, Transform};
