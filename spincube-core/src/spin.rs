//! Drag and spin-down state for an interactive object
//!
//! [`Spinnable`] owns the accumulated orientation of one rotatable object and
//! cycles between two phases: `Idle` (no pointer captured, leftover pointer
//! delta decays and keeps the object coasting) and `Dragging` (pointer
//! captured, every move feeds an incremental rotation). All methods take
//! explicit timestamps so the release-flick window can be tested without a
//! wall clock.

use crate::{project_on_hemisphere, rotation_between, Result, Vector3f, Viewport};
use crate::error::Error;
use instant::Instant;
use nalgebra::{UnitQuaternion, Vector2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning constants for drag rotation and inertial spin-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Multiplier applied to each incremental rotation angle.
    pub sensitivity: f32,
    /// A release this long after the last move recomputes the pointer delta
    /// from the release position, capturing flicks thrown after the pointer
    /// stops reporting moves.
    pub release_flick_window: Duration,
    /// Per-frame multiplier applied to the pointer delta while idle.
    pub damping: f32,
    /// Per-axis magnitude at or below which the delta snaps to exactly zero.
    pub min_delta: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            release_flick_window: Duration::from_millis(50),
            damping: 0.95,
            min_delta: 0.05,
        }
    }
}

impl SpinConfig {
    /// Check that the constants describe a decaying, forward-spinning system
    pub fn validate(&self) -> Result<()> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sensitivity must be positive, got {}",
                self.sensitivity
            )));
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(Error::InvalidConfig(format!(
                "damping must lie in [0, 1), got {}",
                self.damping
            )));
        }
        if !self.min_delta.is_finite() || self.min_delta < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_delta must be non-negative, got {}",
                self.min_delta
            )));
        }
        Ok(())
    }
}

/// Interaction phase of a [`Spinnable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// No pointer captured; leftover delta decays each frame.
    Idle,
    /// Pointer captured; moves feed incremental rotations.
    Dragging,
}

/// A drag-rotatable object with inertial spin-down.
#[derive(Debug, Clone)]
pub struct Spinnable {
    config: SpinConfig,
    phase: SpinPhase,
    orientation: UnitQuaternion<f32>,
    /// Unreleased drag displacement in pixels; decays while idle.
    delta: Vector2<f32>,
    /// Last pointer position seen during the current drag.
    anchor: Vector2<f32>,
    /// Hemisphere point every increment rotates away from.
    rotate_start: Vector3f,
    /// Timestamp of the last drag move, kept across drags.
    last_move: Option<Instant>,
}

impl Spinnable {
    /// Create a spinnable at rest with the identity orientation
    pub fn new(config: SpinConfig) -> Self {
        Self {
            config,
            phase: SpinPhase::Idle,
            orientation: UnitQuaternion::identity(),
            delta: Vector2::zeros(),
            anchor: Vector2::zeros(),
            rotate_start: Vector3f::new(0.0, 0.0, 1.0),
            last_move: None,
        }
    }

    /// Current interaction phase
    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.phase == SpinPhase::Dragging
    }

    /// Accumulated orientation of the object
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    /// Unreleased pointer delta in pixels
    pub fn delta(&self) -> Vector2<f32> {
        self.delta
    }

    /// Tuning constants in effect
    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Capture the pointer and enter the `Dragging` phase.
    ///
    /// Records the drag origin and resets the hemisphere reference to the
    /// projection of a zero offset, so the first move measures from here.
    pub fn begin_drag(&mut self, position: Vector2<f32>, viewport: Viewport) {
        self.phase = SpinPhase::Dragging;
        self.anchor = position;
        self.rotate_start = project_on_hemisphere(Vector2::zeros(), viewport);
        log::debug!("drag started at ({:.0}, {:.0})", position.x, position.y);
    }

    /// Feed a pointer move during a drag.
    ///
    /// The delta against the previous pointer position becomes an
    /// incremental rotation applied immediately; the anchor advances so the
    /// next move measures only its own displacement. Ignored while idle.
    pub fn drag_move(&mut self, position: Vector2<f32>, viewport: Viewport, now: Instant) {
        if self.phase != SpinPhase::Dragging {
            return;
        }
        self.delta = position - self.anchor;
        self.apply_rotation(viewport);
        self.anchor = position;
        self.last_move = Some(now);
    }

    /// Release the pointer and return to the `Idle` phase.
    ///
    /// If the release arrives more than the flick window after the last
    /// move, the delta is recomputed from the release position so a flick
    /// thrown after the pointer stopped still registers. The delta then
    /// coasts via [`Spinnable::tick`]; the release itself applies no
    /// rotation.
    pub fn end_drag(&mut self, position: Vector2<f32>, now: Instant) {
        if self.phase != SpinPhase::Dragging {
            return;
        }
        let stopped = self
            .last_move
            .map_or(true, |t| now.duration_since(t) > self.config.release_flick_window);
        if stopped {
            self.delta = position - self.anchor;
        }
        self.phase = SpinPhase::Idle;
        log::debug!(
            "drag ended at ({:.0}, {:.0}), delta ({:.2}, {:.2})",
            position.x,
            position.y,
            self.delta.x,
            self.delta.y
        );
    }

    /// Advance one animation frame.
    ///
    /// While idle, each delta axis above `min_delta` is scaled by `damping`
    /// and the decayed delta is replayed as a synthetic move; axes at or
    /// below the threshold snap to exactly zero, so the spin-down terminates
    /// instead of tailing off asymptotically. Does nothing during a drag.
    pub fn tick(&mut self, viewport: Viewport) {
        if self.phase == SpinPhase::Dragging {
            return;
        }
        let min = self.config.min_delta;
        if self.delta.x < -min || self.delta.x > min {
            self.delta.x *= self.config.damping;
        } else {
            self.delta.x = 0.0;
        }
        if self.delta.y < -min || self.delta.y > min {
            self.delta.y *= self.config.damping;
        } else {
            self.delta.y = 0.0;
        }
        self.apply_rotation(viewport);
    }

    /// Rotate by the arc from the reference point to the projected delta,
    /// left-multiplying onto the accumulated orientation and renormalizing
    /// against floating-point drift.
    fn apply_rotation(&mut self, viewport: Viewport) {
        let end = project_on_hemisphere(self.delta, viewport);
        let increment = rotation_between(&self.rotate_start, &end, self.config.sensitivity);
        let composed = increment.into_inner() * self.orientation.into_inner();
        self.orientation = UnitQuaternion::new_normalize(composed);
    }
}

impl Default for Spinnable {
    fn default() -> Self {
        Self::new(SpinConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> Viewport {
        Viewport::new(800, 600)
    }

    /// Drag from the origin to `to`, then release within the flick window so
    /// the move delta is what coasts.
    fn spin_up(to: Vector2<f32>) -> Spinnable {
        let mut spin = Spinnable::default();
        let t0 = Instant::now();
        spin.begin_drag(Vector2::zeros(), viewport());
        spin.drag_move(to, viewport(), t0);
        spin.end_drag(to, t0 + Duration::from_millis(10));
        spin
    }

    #[test]
    fn test_default_config_matches_tuning() {
        let config = SpinConfig::default();
        assert_relative_eq!(config.sensitivity, 2.0);
        assert_eq!(config.release_flick_window, Duration::from_millis(50));
        assert_relative_eq!(config.damping, 0.95);
        assert_relative_eq!(config.min_delta, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_constants() {
        let mut config = SpinConfig::default();
        config.damping = 1.0;
        assert!(config.validate().is_err());

        let mut config = SpinConfig::default();
        config.sensitivity = 0.0;
        assert!(config.validate().is_err());

        let mut config = SpinConfig::default();
        config.min_delta = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_phases_cycle_idle_drag_idle() {
        let mut spin = Spinnable::default();
        assert_eq!(spin.phase(), SpinPhase::Idle);
        spin.begin_drag(Vector2::new(100.0, 100.0), viewport());
        assert_eq!(spin.phase(), SpinPhase::Dragging);
        spin.end_drag(Vector2::new(100.0, 100.0), Instant::now());
        assert_eq!(spin.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut spin = Spinnable::default();
        spin.drag_move(Vector2::new(50.0, 0.0), viewport(), Instant::now());
        assert_eq!(spin.orientation(), UnitQuaternion::identity());
        assert_eq!(spin.delta(), Vector2::zeros());
    }

    #[test]
    fn test_decay_step_scales_by_damping() {
        let mut spin = spin_up(Vector2::new(10.0, 10.0));
        assert_eq!(spin.delta(), Vector2::new(10.0, 10.0));
        spin.tick(viewport());
        assert_relative_eq!(spin.delta().x, 9.5);
        assert_relative_eq!(spin.delta().y, 9.5);
    }

    #[test]
    fn test_decay_reaches_exact_zero() {
        let mut spin = spin_up(Vector2::new(10.0, 10.0));
        for _ in 0..200 {
            spin.tick(viewport());
        }
        assert_eq!(spin.delta(), Vector2::zeros());
    }

    #[test]
    fn test_decay_axes_are_independent() {
        let mut spin = spin_up(Vector2::new(10.0, 0.052));
        spin.tick(viewport());
        // y drops under the threshold after one step; x keeps decaying.
        assert_relative_eq!(spin.delta().x, 9.5);
        assert_relative_eq!(spin.delta().y, 0.0494, epsilon = 1e-6);
        spin.tick(viewport());
        assert_eq!(spin.delta().y, 0.0);
        assert!(spin.delta().x > 0.0);
    }

    #[test]
    fn test_release_within_window_keeps_move_delta() {
        let mut spin = Spinnable::default();
        let t0 = Instant::now();
        spin.begin_drag(Vector2::zeros(), viewport());
        spin.drag_move(Vector2::new(30.0, 0.0), viewport(), t0);
        spin.end_drag(Vector2::new(40.0, 0.0), t0 + Duration::from_millis(10));
        assert_eq!(spin.delta(), Vector2::new(30.0, 0.0));
    }

    #[test]
    fn test_late_release_recomputes_flick_delta() {
        let mut spin = Spinnable::default();
        let t0 = Instant::now();
        spin.begin_drag(Vector2::zeros(), viewport());
        spin.drag_move(Vector2::new(30.0, 0.0), viewport(), t0);
        spin.end_drag(Vector2::new(40.0, 0.0), t0 + Duration::from_millis(60));
        assert_eq!(spin.delta(), Vector2::new(10.0, 0.0));
    }

    #[test]
    fn test_press_and_release_in_place_stops_coasting() {
        let mut spin = spin_up(Vector2::new(20.0, 0.0));
        assert!(spin.delta().norm() > 0.0);
        let later = Instant::now() + Duration::from_secs(1);
        spin.begin_drag(Vector2::new(200.0, 200.0), viewport());
        spin.end_drag(Vector2::new(200.0, 200.0), later);
        assert_eq!(spin.delta(), Vector2::zeros());
    }

    #[test]
    fn test_orientation_stays_unit_length() {
        let mut spin = spin_up(Vector2::new(120.0, -80.0));
        for _ in 0..500 {
            spin.tick(viewport());
        }
        assert_relative_eq!(spin.orientation().into_inner().norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_idle_tick_at_rest_keeps_orientation() {
        let mut spin = Spinnable::default();
        spin.tick(viewport());
        assert_eq!(spin.orientation(), UnitQuaternion::identity());
    }

    #[test]
    fn test_zero_size_viewport_tick_keeps_orientation_unit() {
        // A minimized window resizes to 0x0 while a flick is still coasting.
        // The zero delta axis would otherwise normalize as 0/0.
        let mut spin = spin_up(Vector2::new(120.0, 0.0));
        for _ in 0..10 {
            spin.tick(Viewport::new(0, 0));
        }
        let q = spin.orientation().into_inner();
        assert!(q.coords.iter().all(|c| c.is_finite()), "orientation {:?}", q);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-5);
    }
}
