//! Continuous orbit paths
//!
//! A single unbounded motion parameterized by `(angle, elapsed)`. The camera
//! circles the model center at a wobbling radius and height built from
//! harmonic terms of the angle and of the cycle phase, so the path is never
//! exactly circular yet closes seamlessly every full cycle. The look target
//! drifts on its own harmonics around a base look height.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::rig::CameraPose;

/// Smallest usable orbit radius for degenerate (zero-size) models
pub const MIN_RADIUS: f32 = 0.5;
/// Smallest usable orbit height for degenerate models
pub const MIN_HEIGHT: f32 = 0.25;

/// Deterministic wobbling orbit around a fixed center
#[derive(Debug, Clone, Copy)]
pub struct OrbitPath {
    center: Vec3,
    base_radius: f32,
    base_height: f32,
    look_height: f32,
    cycle_duration: f32,
    radius_sway: f32,
    height_sway: f32,
    look_sway: f32,
}

impl OrbitPath {
    /// Build an orbit from model bounds.
    ///
    /// Radius and heights are proportional to the model extent; a zero-size
    /// model falls back to minimum nonzero constants rather than collapsing
    /// to a point. `floor_level` anchors the orbit height when supplied.
    pub fn around_model(center: Vec3, size: Vec3, floor_level: Option<f32>) -> Self {
        let extent = size.x.max(size.y).max(size.z);
        let floor = floor_level.unwrap_or(center.y - size.y * 0.5);
        // Eye sits above the model center, never sinking below the floor
        let base_height = (extent * 0.45)
            .max(MIN_HEIGHT)
            .max(floor - center.y + MIN_HEIGHT);
        Self {
            center,
            base_radius: (extent * 1.6).max(MIN_RADIUS),
            base_height,
            look_height: extent * 0.2,
            cycle_duration: 60.0,
            radius_sway: (extent * 0.25).max(MIN_RADIUS * 0.2),
            height_sway: (extent * 0.12).max(MIN_HEIGHT * 0.2),
            look_sway: (extent * 0.08).max(0.05),
        }
    }

    /// Override the seconds per full revolution
    pub fn with_cycle_duration(mut self, seconds: f32) -> Self {
        self.cycle_duration = seconds.max(1e-3);
        self
    }

    /// Seconds per full revolution
    pub fn cycle_duration(&self) -> f32 {
        self.cycle_duration
    }

    /// Pose at an explicit `(angle, elapsed)` parameter pair.
    ///
    /// Pure and deterministic. All harmonic terms use whole-number multiples
    /// of the angle and of the cycle phase, so advancing both parameters by
    /// one full cycle reproduces the pose exactly and the loop has no seam.
    pub fn sample(&self, angle: f32, elapsed: f32) -> CameraPose {
        let phase = elapsed / self.cycle_duration * TAU;

        let radius = self.base_radius
            + self.radius_sway
                * (0.55 * (2.0 * angle + 0.7).sin()
                    + 0.30 * (3.0 * angle).cos()
                    + 0.15 * (5.0 * phase + 2.1).sin());
        let height = self.base_height
            + self.height_sway
                * (0.6 * (3.0 * angle + 1.9).sin() + 0.4 * (2.0 * phase + 0.3).sin());

        let position = self.center
            + Vec3::new(angle.cos() * radius, height, angle.sin() * radius);

        let target = self.center
            + Vec3::new(
                self.look_sway * 0.7 * (2.0 * phase + 0.4).cos(),
                self.look_height + self.look_sway * 0.6 * (3.0 * phase + 1.1).sin(),
                self.look_sway * 0.7 * (4.0 * phase + 2.6).sin(),
            );

        CameraPose { position, target }
    }

    /// Pose at a total elapsed time, with the angle advancing one full turn
    /// per cycle
    pub fn pose_at(&self, elapsed: f32) -> CameraPose {
        let angle = elapsed / self.cycle_duration * TAU;
        self.sample(angle, elapsed)
    }
}
