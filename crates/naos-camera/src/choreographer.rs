//! Choreographer
//!
//! Owns the playback state for a shot sequence or an orbit path and hands
//! pose ownership between scripted motion and the manual-control layer. At
//! any instant exactly one of the two writes the camera: manual control is
//! disabled for as long as the choreographer is playing, and re-enabled on
//! pause or stop. The first user interaction pauses playback once and
//! latches; later interactions are inert until `reset`.

use glam::Vec3;
use naos_core::smoothstep;

use crate::orbit::OrbitPath;
use crate::rig::{CameraPose, CameraRig, ManualControl};
use crate::shot::ShotSequence;

/// Scripted motion source
#[derive(Debug, Clone)]
pub enum ChoreographyMode {
    /// Discrete jump-cut shot sequence
    Shots(ShotSequence),
    /// Continuous wobbling orbit
    Orbit(OrbitPath),
}

/// Playback state; `Paused` suspends the clock without resetting it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Not running, manual control owns the camera
    Idle,
    /// Advancing every frame, choreographer owns the camera
    Playing,
    /// Clock frozen, manual control temporarily owns the camera
    Paused,
}

/// User input kinds that interrupt playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Pointer button press
    PointerDown,
    /// Scroll wheel
    Wheel,
    /// Touch start
    TouchStart,
    /// Manual-control layer reported it started moving the camera
    ControlStart,
}

/// Construction options
#[derive(Debug, Clone, Copy)]
pub struct ChoreographyOptions {
    /// Begin playing immediately on creation
    pub auto_start: bool,
    /// Externally supplied pose to ease out of before the motion proper
    pub initial_pose: Option<CameraPose>,
    /// Seconds of the one-time lead-in transition
    pub lead_in_duration: f32,
}

impl Default for ChoreographyOptions {
    fn default() -> Self {
        Self {
            auto_start: false,
            initial_pose: None,
            lead_in_duration: 2.5,
        }
    }
}

/// Playback state machine for one choreography
pub struct Choreographer {
    mode: ChoreographyMode,
    state: PlayState,
    elapsed: f32,
    interrupted: bool,
    lead_in: Option<(CameraPose, f32)>,
}

impl Choreographer {
    /// Create a choreographer over an explicit mode.
    ///
    /// With `auto_start` set, playback begins immediately and manual control
    /// is disabled before the first frame.
    pub fn create(
        mode: ChoreographyMode,
        options: ChoreographyOptions,
        controls: &mut dyn ManualControl,
    ) -> Self {
        let lead_in = options
            .initial_pose
            .filter(|_| options.lead_in_duration > 0.0)
            .map(|pose| (pose, options.lead_in_duration));
        let mut this = Self {
            mode,
            state: PlayState::Idle,
            elapsed: 0.0,
            interrupted: false,
            lead_in,
        };
        if options.auto_start {
            this.start(controls);
        }
        this
    }

    /// Orbit choreography built from model bounds
    pub fn orbit_around(
        center: Vec3,
        size: Vec3,
        floor_level: Option<f32>,
        options: ChoreographyOptions,
        controls: &mut dyn ManualControl,
    ) -> Self {
        let path = OrbitPath::around_model(center, size, floor_level);
        Self::create(ChoreographyMode::Orbit(path), options, controls)
    }

    /// Shot-sequence choreography built from model bounds
    pub fn shots_around(
        center: Vec3,
        size: Vec3,
        floor_level: Option<f32>,
        options: ChoreographyOptions,
        controls: &mut dyn ManualControl,
    ) -> Self {
        let floor = floor_level.unwrap_or(center.y - size.y * 0.5);
        let sequence = ShotSequence::around_model(center, size, floor);
        Self::create(ChoreographyMode::Shots(sequence), options, controls)
    }

    /// Whether the clock is advancing
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Current playback state
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether a user interaction has latched the interrupt
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Begin playback from the start; resumes when paused, no-op when
    /// already playing (there is only ever one timeline)
    pub fn start(&mut self, controls: &mut dyn ManualControl) {
        match self.state {
            PlayState::Playing => {}
            PlayState::Paused => self.resume(controls),
            PlayState::Idle => {
                log::debug!("choreography started");
                self.elapsed = 0.0;
                self.state = PlayState::Playing;
                controls.set_enabled(false);
            }
        }
    }

    /// Freeze the clock and hand the camera back to manual control
    pub fn pause(&mut self, controls: &mut dyn ManualControl) {
        if self.state == PlayState::Playing {
            log::debug!("choreography paused at {:.2}s", self.elapsed);
            self.state = PlayState::Paused;
            controls.set_enabled(true);
        }
    }

    /// Unfreeze a paused clock and take the camera back
    pub fn resume(&mut self, controls: &mut dyn ManualControl) {
        if self.state == PlayState::Paused {
            log::debug!("choreography resumed at {:.2}s", self.elapsed);
            self.state = PlayState::Playing;
            controls.set_enabled(false);
        }
    }

    /// Tear playback down entirely and re-enable manual control
    pub fn stop(&mut self, controls: &mut dyn ManualControl) {
        if self.state != PlayState::Idle {
            log::debug!("choreography stopped");
        }
        self.state = PlayState::Idle;
        self.elapsed = 0.0;
        controls.set_enabled(true);
    }

    /// Stop, clear the interrupt latch, and start again from the beginning
    pub fn reset(&mut self, controls: &mut dyn ManualControl) {
        self.stop(controls);
        self.interrupted = false;
        self.start(controls);
    }

    /// Pose at an arbitrary elapsed time, including the one-time lead-in
    /// blend from the supplied initial pose
    pub fn pose_at(&self, elapsed: f32) -> CameraPose {
        let pose = match &self.mode {
            ChoreographyMode::Shots(sequence) => sequence.pose_at(elapsed),
            ChoreographyMode::Orbit(path) => path.pose_at(elapsed),
        };
        match self.lead_in {
            Some((from, duration)) if elapsed < duration => {
                from.lerp(&pose, smoothstep(0.0, 1.0, elapsed / duration))
            }
            _ => pose,
        }
    }

    /// Per-frame update: advance the clock, write the camera pose, then let
    /// the control layer reconcile its tracking state. The pose write always
    /// precedes `controls.update()` within a frame. No-op unless playing.
    pub fn advance(
        &mut self,
        dt: f32,
        rig: &mut dyn CameraRig,
        controls: &mut dyn ManualControl,
    ) {
        if self.state != PlayState::Playing {
            return;
        }
        self.elapsed += dt.max(0.0);
        rig.set_pose(self.pose_at(self.elapsed));
        controls.update();
    }

    /// Report a user interaction. The first one while playing pauses the
    /// choreography and latches; returns whether this call consumed the
    /// event. Latched or inactive choreographies ignore interactions.
    pub fn notify_interaction(
        &mut self,
        kind: InteractionKind,
        controls: &mut dyn ManualControl,
    ) -> bool {
        if self.interrupted || self.state != PlayState::Playing {
            return false;
        }
        log::debug!("user interaction ({kind:?}), yielding camera control");
        self.pause(controls);
        self.interrupted = true;
        true
    }
}
