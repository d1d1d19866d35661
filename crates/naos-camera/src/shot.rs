//! Discrete camera shots
//!
//! A shot teleports the camera to its start pose (jump cut) and tweens both
//! position and look target to its end pose over a fixed duration and easing
//! curve. A sequence chains shots back to back and loops forever; the pose is
//! a pure function of total elapsed seconds, so playback is frame-rate
//! independent.

use glam::Vec3;
use naos_core::Easing;

use crate::rig::CameraPose;

/// Immutable descriptor for one camera shot
#[derive(Debug, Clone, Copy)]
pub struct CameraShot {
    /// Pose the camera snaps to when the shot begins
    pub start: CameraPose,
    /// Pose the camera tweens toward over the shot duration
    pub end: CameraPose,
    /// Shot duration in seconds
    pub duration: f32,
    /// Easing curve applied to the tween
    pub easing: Easing,
}

impl CameraShot {
    /// Create a shot descriptor
    pub fn new(start: CameraPose, end: CameraPose, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration,
            easing,
        }
    }

    /// Pose at `local` seconds into this shot
    pub fn pose_at(&self, local: f32) -> CameraPose {
        let t = self.easing.apply(local / self.duration);
        self.start.lerp(&self.end, t)
    }
}

/// Looping sequence of shots
#[derive(Debug, Clone)]
pub struct ShotSequence {
    shots: Vec<CameraShot>,
    total: f32,
}

impl ShotSequence {
    /// Create a sequence; shots with non-positive durations are dropped
    pub fn new(shots: Vec<CameraShot>) -> Self {
        let shots: Vec<CameraShot> = shots.into_iter().filter(|s| s.duration > 0.0).collect();
        let total = shots.iter().map(|s| s.duration).sum();
        Self { shots, total }
    }

    /// The shots in playback order
    pub fn shots(&self) -> &[CameraShot] {
        &self.shots
    }

    /// Sum of all shot durations (one loop)
    pub fn total_duration(&self) -> f32 {
        self.total
    }

    /// Whether the sequence contains no playable shots
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Pose at a total elapsed time, looping past the last shot.
    ///
    /// Each shot boundary is an exact jump cut: at the instant a shot begins
    /// the returned pose equals its start pose with no interpolation from the
    /// previous shot's end.
    pub fn pose_at(&self, elapsed: f32) -> CameraPose {
        if self.shots.is_empty() {
            return CameraPose::default();
        }
        let mut local = elapsed.rem_euclid(self.total);
        for shot in &self.shots {
            if local < shot.duration {
                return shot.pose_at(local);
            }
            local -= shot.duration;
        }
        // Only reachable through float round-off at the loop seam
        self.shots[0].pose_at(0.0)
    }

    /// Build a scripted tour around a model from its bounds.
    ///
    /// Shots are proportional to the model size so the same choreography
    /// works at any world scale. `floor_level` anchors the low passes.
    pub fn around_model(center: Vec3, size: Vec3, floor_level: f32) -> Self {
        let extent = size.x.max(size.y).max(size.z).max(1e-3);
        let half = extent * 0.5;
        let eye_low = floor_level + extent * 0.08;
        let look_mid = center + Vec3::new(0.0, extent * 0.15, 0.0);

        let shots = vec![
            // Establishing: high corner sweep descending toward the front
            CameraShot::new(
                CameraPose::new(center + Vec3::new(extent * 1.4, extent * 0.9, extent * 1.4), look_mid),
                CameraPose::new(center + Vec3::new(extent * 0.9, extent * 0.35, extent * 1.1), look_mid),
                9.0,
                Easing::SineInOut,
            ),
            // Low dolly across the facade
            CameraShot::new(
                CameraPose::new(
                    Vec3::new(center.x - half, eye_low, center.z + extent * 0.8),
                    center + Vec3::new(-half * 0.4, extent * 0.2, 0.0),
                ),
                CameraPose::new(
                    Vec3::new(center.x + half, eye_low, center.z + extent * 0.8),
                    center + Vec3::new(half * 0.4, extent * 0.2, 0.0),
                ),
                8.0,
                Easing::QuadInOut,
            ),
            // Close flank pass
            CameraShot::new(
                CameraPose::new(
                    center + Vec3::new(extent * 0.7, extent * 0.2, -extent * 0.4),
                    center + Vec3::new(0.0, extent * 0.25, -extent * 0.2),
                ),
                CameraPose::new(
                    center + Vec3::new(extent * 0.55, extent * 0.45, extent * 0.45),
                    look_mid,
                ),
                7.0,
                Easing::CubicInOut,
            ),
            // Pull-back reveal from behind
            CameraShot::new(
                CameraPose::new(center + Vec3::new(-extent * 0.5, extent * 0.3, -extent * 0.6), look_mid),
                CameraPose::new(center + Vec3::new(-extent * 1.3, extent * 0.8, -extent * 1.3), look_mid),
                10.0,
                Easing::SineInOut,
            ),
        ];
        Self::new(shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(x: f32) -> CameraPose {
        CameraPose::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x, 1.0, 0.0))
    }

    fn two_shots() -> ShotSequence {
        ShotSequence::new(vec![
            CameraShot::new(pose(0.0), pose(10.0), 4.0, Easing::Linear),
            CameraShot::new(pose(100.0), pose(120.0), 6.0, Easing::Linear),
        ])
    }

    #[test]
    fn test_tween_within_shot() {
        let seq = two_shots();
        let mid = seq.pose_at(2.0);
        assert!((mid.position.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_shot_approaches_end_then_jump_cuts() {
        let seq = two_shots();
        // Just before the boundary the pose approaches shot 0's end
        let before = seq.pose_at(4.0 - 1e-4);
        assert!((before.position.x - 10.0).abs() < 1e-2);
        // At the boundary the pose snaps exactly to shot 1's start
        let after = seq.pose_at(4.0);
        assert_eq!(after.position, pose(100.0).position);
        assert_eq!(after.target, pose(100.0).target);
    }

    #[test]
    fn test_loops_back_to_first_shot() {
        let seq = two_shots();
        let total = seq.total_duration();
        assert!((total - 10.0).abs() < 1e-6);
        let wrapped = seq.pose_at(total);
        assert_eq!(wrapped.position, pose(0.0).position);
        // A second loop plus an offset matches the first loop
        let a = seq.pose_at(3.0);
        let b = seq.pose_at(total * 2.0 + 3.0);
        assert!((a.position - b.position).length() < 1e-3);
    }

    #[test]
    fn test_zero_duration_shots_dropped() {
        let seq = ShotSequence::new(vec![
            CameraShot::new(pose(0.0), pose(1.0), 0.0, Easing::Linear),
            CameraShot::new(pose(2.0), pose(3.0), 5.0, Easing::Linear),
        ]);
        assert_eq!(seq.shots().len(), 1);
        assert!((seq.total_duration() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_around_model_scales_with_size() {
        let small = ShotSequence::around_model(Vec3::ZERO, Vec3::splat(2.0), 0.0);
        let large = ShotSequence::around_model(Vec3::ZERO, Vec3::splat(200.0), 0.0);
        assert_eq!(small.shots().len(), large.shots().len());
        let near = small.shots()[0].start.position.length();
        let far = large.shots()[0].start.position.length();
        assert!((far / near - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_empty_sequence_yields_default_pose() {
        let seq = ShotSequence::new(Vec::new());
        assert!(seq.is_empty());
        assert_eq!(seq.pose_at(3.0), CameraPose::default());
    }
}
