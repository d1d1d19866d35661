//! Camera seams
//!
//! The choreographer drives any camera through two narrow traits: a rig with
//! a mutable position/look-target pair, and the manual-control layer whose
//! internal tracking must be reconciled after each scripted write. Basic
//! implementations are provided for tests and headless previews.

use glam::Vec3;

/// A camera position and its look target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

impl CameraPose {
    /// Create a pose from position and target
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Interpolate position and target toward another pose
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 5.0),
            target: Vec3::ZERO,
        }
    }
}

/// Mutable camera seam written by the choreographer
pub trait CameraRig {
    /// Current pose
    fn pose(&self) -> CameraPose;
    /// Overwrite position and look target
    fn set_pose(&mut self, pose: CameraPose);
}

/// Manual camera control layer (orbit/pan/zoom input handling)
pub trait ManualControl {
    /// Enable or disable user-driven camera control
    fn set_enabled(&mut self, enabled: bool);
    /// Whether user-driven control is currently enabled
    fn is_enabled(&self) -> bool;
    /// Reconcile internal damping/tracking state with the camera; called
    /// once per frame after the scripted pose write
    fn update(&mut self);
}

/// Plain value-holding rig
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRig {
    pose: CameraPose,
}

impl BasicRig {
    /// Create a rig at the given pose
    pub fn new(pose: CameraPose) -> Self {
        Self { pose }
    }
}

impl CameraRig for BasicRig {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }
}

/// Minimal manual-control implementation tracking enablement and reconciles
#[derive(Debug, Clone, Copy)]
pub struct BasicControls {
    enabled: bool,
    updates: u64,
}

impl BasicControls {
    /// Create controls, enabled by default
    pub fn new() -> Self {
        Self {
            enabled: true,
            updates: 0,
        }
    }

    /// Number of reconcile calls so far
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl Default for BasicControls {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualControl for BasicControls {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self) {
        self.updates += 1;
    }
}
