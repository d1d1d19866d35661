//! # Naos Camera
//!
//! Scripted camera choreography:
//! - **Shots**: discrete jump-cut sequences tweened over time
//! - **Orbit**: continuous wobbling orbit paths that never drift
//! - **Choreographer**: play/pause/interrupt state machine handing pose
//!   ownership between scripted motion and manual controls
//!
//! Both variants compute poses as pure functions of elapsed time, so playback
//! is frame-rate independent and testable without a real clock.

pub mod choreographer;
pub mod orbit;
pub mod rig;
pub mod shot;

pub use choreographer::{
    Choreographer, ChoreographyMode, ChoreographyOptions, InteractionKind, PlayState,
};
pub use orbit::OrbitPath;
pub use rig::{BasicControls, BasicRig, CameraPose, CameraRig, ManualControl};
pub use shot::{CameraShot, ShotSequence};
