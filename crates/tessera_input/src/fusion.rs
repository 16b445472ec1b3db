//! Pointer and wheel fusion for the hypercube axes
//!
//! Two pointer contributions are summed into angular velocity each frame:
//! - Immediate response: pointer movement since the last frame (flicks)
//! - Constant force: the centered pointer position, applied as an
//!   acceleration every frame while the pointer rests off-center
//!
//! Horizontal pointer input drives `ry`, vertical drives `rx`. The wheel
//! feeds `rwy` through its own velocity limits.

use serde::{Deserialize, Serialize};

use crate::axes::{AxisId, MotionLimits, RotationAxisSet};
use crate::sample::FrameInput;

/// Pointer fusion tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Radians per frame per unit of centered pointer movement
    pub velocity_scale: f32,
    /// Acceleration per frame per unit of centered pointer offset
    pub force_constant: f32,
    /// Velocity ceiling in radians per frame
    pub max_velocity: f32,
    /// Per-frame velocity decay
    pub damping: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            velocity_scale: 0.5,
            force_constant: 0.004,
            max_velocity: 0.08,
            damping: 0.95,
        }
    }
}

impl FusionConfig {
    fn limits(&self) -> MotionLimits {
        MotionLimits {
            max_velocity: self.max_velocity,
            damping: self.damping,
        }
    }
}

/// Wheel channel tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Radians per frame per scrolled line
    pub scale: f32,
    /// Velocity ceiling in radians per frame
    pub max_velocity: f32,
    /// Per-frame velocity decay
    pub damping: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            scale: 0.01,
            max_velocity: 0.1,
            damping: 0.9,
        }
    }
}

impl WheelConfig {
    fn limits(&self) -> MotionLimits {
        MotionLimits {
            max_velocity: self.max_velocity,
            damping: self.damping,
        }
    }
}

/// Fuses pointer velocity, pointer force and wheel into axis motion
#[derive(Debug, Clone, Default)]
pub struct InputFusionEngine {
    pub pointer: FusionConfig,
    pub wheel: WheelConfig,
}

impl InputFusionEngine {
    pub fn new(pointer: FusionConfig, wheel: WheelConfig) -> Self {
        Self { pointer, wheel }
    }

    /// Advance `rx`, `ry` and `rwy` by one frame
    pub fn update(&self, axes: &mut RotationAxisSet, input: &FrameInput) {
        let offset = input.pointer_position.unwrap_or_default();
        let motion = input.pointer_motion;
        let limits = self.pointer.limits();

        let ry_accel = motion.x * self.pointer.velocity_scale + offset.x * self.pointer.force_constant;
        let rx_accel = motion.y * self.pointer.velocity_scale + offset.y * self.pointer.force_constant;

        axes.get_mut(AxisId::Ry).integrate(ry_accel, limits);
        axes.get_mut(AxisId::Rx).integrate(rx_accel, limits);

        axes.get_mut(AxisId::Rwy)
            .integrate(input.wheel * self.wheel.scale, self.wheel.limits());
    }

    /// Builder: set pointer tuning
    pub fn with_pointer(mut self, pointer: FusionConfig) -> Self {
        self.pointer = pointer;
        self
    }

    /// Builder: set wheel tuning
    pub fn with_wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = wheel;
        self
    }
}
