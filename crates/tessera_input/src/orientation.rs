//! Device orientation ("magic window") adapter
//!
//! Maps a phone's orientation sensor onto the camera axes so that tilting
//! the device pans the view like looking through a window.
//!
//! Lifecycle:
//! ```text
//! Uninitialized -> PermissionPending -> PermissionDenied
//!                                    -> Calibrating -> Active <-> Paused
//! ```
//!
//! Each reading is turned into a *target* rotation relative to a captured
//! baseline. The camera interpolates toward that target every frame on an
//! unwrapped signed state; only the result is wrapped into the axes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::axes::{AxisId, RotationAxisSet};
use crate::sample::OrientationReading;
use tessera_math::normalize_degrees;

/// Where the adapter is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationState {
    /// Source off
    Uninitialized,
    /// Waiting for the user to answer a permission prompt
    PermissionPending,
    /// Permission refused; contributes nothing
    PermissionDenied,
    /// Capturing the baseline and waiting for the sensor to settle
    Calibrating,
    /// Driving the camera axes
    Active,
    /// Animation loop inactive; listener removed
    Paused,
}

impl fmt::Display for OrientationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrientationState::Uninitialized => "off",
            OrientationState::PermissionPending => "awaiting permission",
            OrientationState::PermissionDenied => "permission denied",
            OrientationState::Calibrating => "calibrating",
            OrientationState::Active => "active",
            OrientationState::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Orientation tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// The platform gates the sensor behind an explicit user grant
    pub requires_permission: bool,
    /// Delay after the baseline sample before the adapter goes active
    pub settle_seconds: f32,
    /// Deltas smaller than this are treated as sensor noise
    pub deadzone_degrees: f32,
    /// Radians of camera rotation per radian of tilt: [beta, gamma, alpha]
    pub sensitivity: [f32; 3],
    /// Largest camera rotation on any axis, in radians
    pub max_rotation: f32,
    /// Fraction of the remaining distance to the target covered per frame
    pub smoothing: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            requires_permission: false,
            settle_seconds: 1.5,
            deadzone_degrees: 3.0,
            sensitivity: [0.8, 0.8, 0.5],
            max_rotation: 0.6,
            smoothing: 0.1,
        }
    }
}

/// Camera axes in [beta, gamma, alpha] order
const CAMERA_AXES: [AxisId; 3] = [AxisId::CameraRx, AxisId::CameraRy, AxisId::CameraRz];

/// Calibrates and smooths the orientation feed into camera rotation
#[derive(Debug, Clone)]
pub struct DeviceOrientationAdapter {
    config: OrientationConfig,
    state: OrientationState,
    baseline: Option<OrientationReading>,
    settle_elapsed: f32,
    target: [f32; 3],
    current: [f32; 3],
    listening: bool,
}

impl DeviceOrientationAdapter {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            config,
            state: OrientationState::Uninitialized,
            baseline: None,
            settle_elapsed: 0.0,
            target: [0.0; 3],
            current: [0.0; 3],
            listening: false,
        }
    }

    #[inline]
    pub fn state(&self) -> OrientationState {
        self.state
    }

    /// True while the sensor listener should be registered with the host
    #[inline]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    /// Current target rotation in radians, [beta, gamma, alpha]
    pub fn target(&self) -> [f32; 3] {
        self.target
    }

    /// Switch the source on.
    ///
    /// `remembered` is the persisted answer to an earlier permission prompt.
    /// A remembered grant, or a platform without a permission gate, goes
    /// straight to calibration.
    pub fn enable(&mut self, remembered: Option<bool>) -> OrientationState {
        if !matches!(
            self.state,
            OrientationState::Uninitialized | OrientationState::PermissionDenied
        ) {
            return self.state;
        }

        match (self.config.requires_permission, remembered) {
            (false, _) | (true, Some(true)) => self.begin_calibration(),
            (true, Some(false)) => self.transition(OrientationState::PermissionDenied),
            (true, None) => self.transition(OrientationState::PermissionPending),
        }
        self.state
    }

    /// Apply the user's answer to a pending permission prompt
    pub fn resolve_permission(&mut self, granted: bool) -> OrientationState {
        if self.state != OrientationState::PermissionPending {
            log::debug!("Ignoring permission answer in state '{}'", self.state);
            return self.state;
        }
        if granted {
            self.begin_calibration();
        } else {
            log::warn!("Orientation permission denied; pointer and touch remain active");
            self.transition(OrientationState::PermissionDenied);
        }
        self.state
    }

    /// Switch the source off, removing the listener and zeroing its axes
    pub fn disable(&mut self, axes: &mut RotationAxisSet) {
        self.listening = false;
        self.baseline = None;
        self.settle_elapsed = 0.0;
        self.target = [0.0; 3];
        self.current = [0.0; 3];
        // Disabled camera axes still hold the last sensor rotation
        for id in CAMERA_AXES {
            axes.clear(id);
        }
        self.transition(OrientationState::Uninitialized);
    }

    /// Animation loop went inactive
    pub fn pause(&mut self) {
        if matches!(self.state, OrientationState::Active | OrientationState::Calibrating) {
            self.listening = false;
            self.transition(OrientationState::Paused);
        }
    }

    /// Animation loop became active again; the device may have moved, so a
    /// fresh baseline is taken
    pub fn resume(&mut self) {
        if self.state == OrientationState::Paused {
            self.begin_calibration();
        }
    }

    /// Map a reading to a target rotation relative to the baseline.
    ///
    /// Returns zero on every axis when no baseline has been captured.
    pub fn map_reading(&self, reading: OrientationReading) -> [f32; 3] {
        let Some(base) = self.baseline else {
            return [0.0; 3];
        };
        let deltas = [
            reading.beta - base.beta,
            reading.gamma - base.gamma,
            normalize_degrees(reading.alpha - base.alpha),
        ];
        let mut target = [0.0; 3];
        for (i, delta) in deltas.into_iter().enumerate() {
            if delta.abs() < self.config.deadzone_degrees {
                continue;
            }
            target[i] = (delta.to_radians() * self.config.sensitivity[i])
                .clamp(-self.config.max_rotation, self.config.max_rotation);
        }
        target
    }

    /// Advance one frame with the reading drained this tick, if any
    pub fn update(&mut self, dt: f32, reading: Option<OrientationReading>, axes: &mut RotationAxisSet) {
        match self.state {
            OrientationState::Calibrating => match self.baseline {
                None => {
                    if let Some(r) = reading {
                        self.baseline = Some(r);
                        self.settle_elapsed = 0.0;
                        log::debug!(
                            "Orientation baseline captured: alpha={:.1} beta={:.1} gamma={:.1}",
                            r.alpha, r.beta, r.gamma
                        );
                    }
                }
                Some(_) => {
                    self.settle_elapsed += dt;
                    if self.settle_elapsed >= self.config.settle_seconds {
                        self.transition(OrientationState::Active);
                    }
                }
            },
            OrientationState::Active => {
                if let Some(r) = reading {
                    self.target = self.map_reading(r);
                }
                for (i, id) in CAMERA_AXES.into_iter().enumerate() {
                    self.current[i] += (self.target[i] - self.current[i]) * self.config.smoothing;
                    axes.get_mut(id).set_angle(self.current[i]);
                }
            }
            OrientationState::Uninitialized
            | OrientationState::PermissionPending
            | OrientationState::PermissionDenied
            | OrientationState::Paused => {}
        }
    }

    /// Zero the interpolated camera state (reset-all)
    pub fn reset(&mut self) {
        self.target = [0.0; 3];
        self.current = [0.0; 3];
    }

    fn begin_calibration(&mut self) {
        self.baseline = None;
        self.settle_elapsed = 0.0;
        self.listening = true;
        self.transition(OrientationState::Calibrating);
    }

    fn transition(&mut self, next: OrientationState) {
        if self.state != next {
            log::info!("Device orientation: {} -> {}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gated() -> OrientationConfig {
        OrientationConfig {
            requires_permission: true,
            ..Default::default()
        }
    }

    fn calibrated(baseline: OrientationReading) -> (DeviceOrientationAdapter, RotationAxisSet) {
        let mut adapter = DeviceOrientationAdapter::new(OrientationConfig::default());
        let mut axes = RotationAxisSet::new();
        adapter.enable(None);
        adapter.update(0.016, Some(baseline), &mut axes);
        adapter.update(2.0, None, &mut axes);
        assert_eq!(adapter.state(), OrientationState::Active);
        (adapter, axes)
    }

    #[test]
    fn test_ungated_platform_calibrates_immediately() {
        let mut adapter = DeviceOrientationAdapter::new(OrientationConfig::default());
        assert_eq!(adapter.enable(None), OrientationState::Calibrating);
        assert!(adapter.is_listening());
    }

    #[test]
    fn test_gated_platform_waits_for_permission() {
        let mut adapter = DeviceOrientationAdapter::new(gated());
        assert_eq!(adapter.enable(None), OrientationState::PermissionPending);
        assert!(!adapter.is_listening());
        assert_eq!(adapter.resolve_permission(true), OrientationState::Calibrating);
        assert!(adapter.is_listening());
    }

    #[test]
    fn test_remembered_grant_skips_prompt() {
        let mut adapter = DeviceOrientationAdapter::new(gated());
        assert_eq!(adapter.enable(Some(true)), OrientationState::Calibrating);
    }

    #[test]
    fn test_denial_is_terminal_and_inert() {
        let mut adapter = DeviceOrientationAdapter::new(gated());
        let mut axes = RotationAxisSet::new();
        adapter.enable(None);
        assert_eq!(adapter.resolve_permission(false), OrientationState::PermissionDenied);

        adapter.update(0.016, Some(OrientationReading::new(90.0, 40.0, 40.0)), &mut axes);
        assert!(axes.iter().all(|a| a.angle == 0.0));
        assert!(!adapter.is_listening());

        // Remembered decline parks immediately
        let mut again = DeviceOrientationAdapter::new(gated());
        assert_eq!(again.enable(Some(false)), OrientationState::PermissionDenied);
    }

    #[test]
    fn test_settle_delay_before_active() {
        let mut adapter = DeviceOrientationAdapter::new(OrientationConfig::default());
        let mut axes = RotationAxisSet::new();
        adapter.enable(None);

        // No reading yet: no baseline, settle clock does not run
        adapter.update(5.0, None, &mut axes);
        assert_eq!(adapter.state(), OrientationState::Calibrating);

        adapter.update(0.016, Some(OrientationReading::new(10.0, 20.0, 30.0)), &mut axes);
        adapter.update(1.0, None, &mut axes);
        assert_eq!(adapter.state(), OrientationState::Calibrating);
        adapter.update(0.5, None, &mut axes);
        assert_eq!(adapter.state(), OrientationState::Active);
    }

    #[test]
    fn test_calibration_zero_point() {
        let baseline = OrientationReading::new(123.0, 45.0, -12.0);
        let (adapter, _) = calibrated(baseline);
        assert_eq!(adapter.map_reading(baseline), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_alpha_wraps_across_north() {
        let (adapter, _) = calibrated(OrientationReading::new(355.0, 0.0, 0.0));
        // 355 -> 15 is +20 degrees, not -340
        let target = adapter.map_reading(OrientationReading::new(15.0, 0.0, 0.0));
        let expected = 20f32.to_radians() * adapter.config().sensitivity[2];
        assert!((target[2] - expected).abs() < 1e-5);
    }

    #[test]
    fn test_deadzone_rejects_noise() {
        let (adapter, _) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        let target = adapter.map_reading(OrientationReading::new(2.0, -2.5, 1.0));
        assert_eq!(target, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_target_is_clamped() {
        let (adapter, _) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        let target = adapter.map_reading(OrientationReading::new(0.0, 170.0, -170.0));
        let max = adapter.config().max_rotation;
        assert_eq!(target[0], max);
        assert_eq!(target[1], -max);
    }

    #[test]
    fn test_current_converges_to_target_without_drift() {
        let (mut adapter, mut axes) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        let tilt = OrientationReading::new(0.0, 20.0, 0.0);
        adapter.update(0.016, Some(tilt), &mut axes);
        for _ in 0..500 {
            adapter.update(0.016, None, &mut axes);
        }
        let target = adapter.target()[0];
        assert!((axes.angle(AxisId::CameraRx) - target).abs() < 1e-4);

        // Holding the same tilt does not keep rotating
        for _ in 0..500 {
            adapter.update(0.016, Some(tilt), &mut axes);
        }
        assert!((axes.angle(AxisId::CameraRx) - target).abs() < 1e-4);
    }

    #[test]
    fn test_negative_target_lands_wrapped() {
        let (mut adapter, mut axes) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        adapter.update(0.016, Some(OrientationReading::new(0.0, 0.0, -20.0)), &mut axes);
        for _ in 0..500 {
            adapter.update(0.016, None, &mut axes);
        }
        let angle = axes.angle(AxisId::CameraRy);
        assert!(angle > std::f32::consts::PI && angle < std::f32::consts::TAU);
    }

    #[test]
    fn test_disable_zeroes_contribution() {
        let (mut adapter, mut axes) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        adapter.update(0.016, Some(OrientationReading::new(30.0, 30.0, 30.0)), &mut axes);
        assert!(axes.angle(AxisId::CameraRx) != 0.0);

        adapter.disable(&mut axes);
        assert_eq!(adapter.state(), OrientationState::Uninitialized);
        assert!(!adapter.is_listening());
        for id in CAMERA_AXES {
            assert_eq!(axes.angle(id), 0.0);
        }
    }

    #[test]
    fn test_pause_and_resume_recalibrates() {
        let (mut adapter, _) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        adapter.pause();
        assert_eq!(adapter.state(), OrientationState::Paused);
        assert!(!adapter.is_listening());

        adapter.resume();
        assert_eq!(adapter.state(), OrientationState::Calibrating);
        assert!(adapter.is_listening());
        assert_eq!(adapter.map_reading(OrientationReading::new(0.0, 50.0, 0.0)), [0.0; 3]);
    }

    #[test]
    fn test_enable_twice_is_idempotent() {
        let (mut adapter, _) = calibrated(OrientationReading::new(0.0, 0.0, 0.0));
        assert_eq!(adapter.enable(None), OrientationState::Active);
    }
}
