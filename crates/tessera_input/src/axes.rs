//! Rotation axis state shared by every input channel
//!
//! Each axis holds an angle in `[0, 2π)`, an angular velocity and an enable
//! flag. Adapters only ever touch the axes they own; the composer reads all
//! of them once per frame.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tessera_math::wrap_radians;

/// Identifier of a rotation axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisId {
    /// Hypercube rotation about X (pointer vertical)
    Rx,
    /// Hypercube rotation about Y (pointer horizontal)
    Ry,
    /// Hypercube rotation in the XW plane (touch horizontal)
    Rwx,
    /// Hypercube rotation in the YW plane (wheel, touch vertical)
    Rwy,
    /// Camera pitch (device beta)
    CameraRx,
    /// Camera yaw (device gamma)
    CameraRy,
    /// Camera roll (device alpha)
    CameraRz,
}

impl AxisId {
    /// Number of stored axes
    pub const COUNT: usize = 7;

    /// All axes in storage order
    pub const ALL: [AxisId; Self::COUNT] = [
        AxisId::Rx,
        AxisId::Ry,
        AxisId::Rwx,
        AxisId::Rwy,
        AxisId::CameraRx,
        AxisId::CameraRy,
        AxisId::CameraRz,
    ];

    /// Canonical external name
    pub fn name(self) -> &'static str {
        match self {
            AxisId::Rx => "rx",
            AxisId::Ry => "ry",
            AxisId::Rwx => "rwx",
            AxisId::Rwy => "rwy",
            AxisId::CameraRx => "cameraRx",
            AxisId::CameraRy => "cameraRy",
            AxisId::CameraRz => "cameraRz",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An axis name that does not match any known axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisParseError(pub String);

impl fmt::Display for AxisParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rotation axis '{}'", self.0)
    }
}

impl std::error::Error for AxisParseError {}

impl FromStr for AxisId {
    type Err = AxisParseError;

    /// Accepts canonical names, snake_case camera names, and the legacy `rw`
    /// name which resolves to [`AxisId::Rwy`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rx" => Ok(AxisId::Rx),
            "ry" => Ok(AxisId::Ry),
            "rwx" => Ok(AxisId::Rwx),
            "rwy" | "rw" => Ok(AxisId::Rwy),
            "cameraRx" | "camera_rx" => Ok(AxisId::CameraRx),
            "cameraRy" | "camera_ry" => Ok(AxisId::CameraRy),
            "cameraRz" | "camera_rz" => Ok(AxisId::CameraRz),
            other => Err(AxisParseError(other.to_string())),
        }
    }
}

/// Velocity ceiling and per-frame friction for one integrated channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionLimits {
    /// Largest allowed |velocity| in radians per frame
    pub max_velocity: f32,
    /// Multiplicative velocity decay per frame (< 1)
    pub damping: f32,
}

/// One rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationAxis {
    pub id: AxisId,
    /// Radians, always in `[0, 2π)`
    pub angle: f32,
    /// Radians per frame
    pub velocity: f32,
    pub enabled: bool,
}

impl RotationAxis {
    fn new(id: AxisId) -> Self {
        Self {
            id,
            angle: 0.0,
            velocity: 0.0,
            enabled: true,
        }
    }

    /// One integration step: accelerate, clamp, advance, then damp.
    ///
    /// The clamp runs every step, so a constant acceleration saturates at
    /// `max_velocity` instead of growing without bound. A disabled axis is
    /// held at zero velocity and does not move.
    pub fn integrate(&mut self, acceleration: f32, limits: MotionLimits) {
        if !self.enabled {
            self.velocity = 0.0;
            return;
        }
        self.velocity = (self.velocity + acceleration).clamp(-limits.max_velocity, limits.max_velocity);
        self.angle = wrap_radians(self.angle + self.velocity);
        self.velocity *= limits.damping;
    }

    /// Advance the angle directly (no velocity involved)
    pub fn rotate_by(&mut self, delta: f32) {
        if self.enabled {
            self.angle = wrap_radians(self.angle + delta);
        }
    }

    /// Overwrite the angle with an absolute value, wrapping it into range
    pub fn set_angle(&mut self, angle: f32) {
        if self.enabled {
            self.angle = wrap_radians(angle);
        }
    }
}

/// The full orientation state
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAxisSet {
    axes: [RotationAxis; AxisId::COUNT],
}

impl Default for RotationAxisSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationAxisSet {
    /// All axes at zero, enabled
    pub fn new() -> Self {
        Self {
            axes: AxisId::ALL.map(RotationAxis::new),
        }
    }

    #[inline]
    pub fn get(&self, id: AxisId) -> &RotationAxis {
        &self.axes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: AxisId) -> &mut RotationAxis {
        &mut self.axes[id.index()]
    }

    /// Current angle of an axis in radians
    #[inline]
    pub fn angle(&self, id: AxisId) -> f32 {
        self.get(id).angle
    }

    #[inline]
    pub fn is_enabled(&self, id: AxisId) -> bool {
        self.get(id).enabled
    }

    /// Flip an axis' enable flag and return the new state.
    ///
    /// Velocity is zeroed on every toggle so that re-enabling never resumes
    /// motion left over from before the axis was disabled.
    pub fn toggle(&mut self, id: AxisId) -> bool {
        let axis = self.get_mut(id);
        axis.enabled = !axis.enabled;
        axis.velocity = 0.0;
        axis.enabled
    }

    /// Set an axis' enable flag, zeroing its velocity
    pub fn set_enabled(&mut self, id: AxisId, enabled: bool) {
        let axis = self.get_mut(id);
        axis.enabled = enabled;
        axis.velocity = 0.0;
    }

    /// Zero one axis' angle and velocity, whether or not it is enabled
    pub fn clear(&mut self, id: AxisId) {
        let axis = self.get_mut(id);
        axis.angle = 0.0;
        axis.velocity = 0.0;
    }

    /// Zero every angle and velocity. Enable flags are kept.
    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.angle = 0.0;
            axis.velocity = 0.0;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RotationAxis> {
        self.axes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const LIMITS: MotionLimits = MotionLimits {
        max_velocity: 0.1,
        damping: 0.95,
    };

    #[test]
    fn test_axis_names_round_trip() {
        for id in AxisId::ALL {
            assert_eq!(id.name().parse::<AxisId>(), Ok(id));
        }
    }

    #[test]
    fn test_legacy_rw_alias() {
        assert_eq!("rw".parse::<AxisId>(), Ok(AxisId::Rwy));
    }

    #[test]
    fn test_unknown_axis_name() {
        let err = "rz".parse::<AxisId>().unwrap_err();
        assert_eq!(err, AxisParseError("rz".to_string()));
        assert!(err.to_string().contains("rz"));
    }

    #[test]
    fn test_integrate_clamps_velocity() {
        let mut set = RotationAxisSet::new();
        let axis = set.get_mut(AxisId::Rx);
        for _ in 0..1000 {
            axis.integrate(0.05, LIMITS);
            assert!(axis.velocity.abs() <= LIMITS.max_velocity);
        }
    }

    #[test]
    fn test_integrate_keeps_angle_wrapped() {
        let mut set = RotationAxisSet::new();
        let axis = set.get_mut(AxisId::Ry);
        for step in 0..5000 {
            let accel = if step % 700 < 350 { 0.03 } else { -0.03 };
            axis.integrate(accel, LIMITS);
            assert!(axis.angle >= 0.0 && axis.angle < TAU, "angle {}", axis.angle);
        }
    }

    #[test]
    fn test_disabled_axis_holds_still() {
        let mut set = RotationAxisSet::new();
        set.get_mut(AxisId::Rx).integrate(0.05, LIMITS);
        let angle = set.angle(AxisId::Rx);

        assert!(!set.toggle(AxisId::Rx));
        assert_eq!(set.get(AxisId::Rx).velocity, 0.0);

        set.get_mut(AxisId::Rx).integrate(0.05, LIMITS);
        set.get_mut(AxisId::Rx).rotate_by(1.0);
        assert_eq!(set.angle(AxisId::Rx), angle);
        assert_eq!(set.get(AxisId::Rx).velocity, 0.0);
    }

    #[test]
    fn test_reenable_does_not_resume_motion() {
        let mut set = RotationAxisSet::new();
        set.get_mut(AxisId::Rwy).velocity = 0.08;
        set.toggle(AxisId::Rwy);
        assert!(set.toggle(AxisId::Rwy));
        assert_eq!(set.get(AxisId::Rwy).velocity, 0.0);
    }

    #[test]
    fn test_reset_keeps_enable_flags() {
        let mut set = RotationAxisSet::new();
        set.get_mut(AxisId::CameraRz).set_angle(2.0);
        set.set_enabled(AxisId::Ry, false);
        set.reset();
        assert!(set.iter().all(|a| a.angle == 0.0 && a.velocity == 0.0));
        assert!(!set.is_enabled(AxisId::Ry));
    }

    #[test]
    fn test_clear_ignores_enable_flag() {
        let mut set = RotationAxisSet::new();
        set.get_mut(AxisId::CameraRy).set_angle(0.3);
        set.set_enabled(AxisId::CameraRy, false);
        set.get_mut(AxisId::CameraRy).set_angle(0.0);
        assert_eq!(set.angle(AxisId::CameraRy), 0.3);

        set.clear(AxisId::CameraRy);
        assert_eq!(set.angle(AxisId::CameraRy), 0.0);
        assert!(!set.is_enabled(AxisId::CameraRy));
    }

    #[test]
    fn test_set_angle_wraps_negative() {
        let mut set = RotationAxisSet::new();
        set.get_mut(AxisId::CameraRx).set_angle(-0.5);
        assert!((set.angle(AxisId::CameraRx) - (TAU - 0.5)).abs() < 1e-5);
    }
}
