//! Touch-drag rotation of the 4D planes
//!
//! Horizontal drag turns `rwx`, vertical drag turns `rwy`. A drag applies
//! directly to the angles and leaves behind a momentum that keeps turning
//! the planes for a few frames after the finger lifts. The momentum decays
//! faster than pointer velocity so gestures settle quickly.

use serde::{Deserialize, Serialize};
use tessera_math::Vec2;

use crate::axes::{AxisId, RotationAxisSet};

/// Below this the momentum is snapped to zero
const MOMENTUM_EPSILON: f32 = 1e-6;

/// Gesture tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Radians per full-viewport drag
    pub scale: f32,
    /// Per-frame momentum decay after the drag stops
    pub damping: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scale: 3.0,
            damping: 0.85,
        }
    }
}

/// Converts drag deltas into incremental plane rotation
#[derive(Debug, Clone)]
pub struct TouchGestureAdapter {
    config: GestureConfig,
    enabled: bool,
    momentum: Vec2,
}

impl TouchGestureAdapter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            enabled: true,
            momentum: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch the gesture source; turning it off stops any coasting rotation
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.momentum = Vec2::ZERO;
        }
    }

    /// Remaining per-frame rotation after the finger lifted
    pub fn momentum(&self) -> Vec2 {
        self.momentum
    }

    /// Apply this tick's drained drag delta
    pub fn update(&mut self, drag: Vec2, axes: &mut RotationAxisSet) {
        if !self.enabled {
            return;
        }

        let step = if drag != Vec2::ZERO {
            let step = drag * self.config.scale;
            self.momentum = step;
            step
        } else {
            self.momentum = self.momentum * self.config.damping;
            if self.momentum.length() < MOMENTUM_EPSILON {
                self.momentum = Vec2::ZERO;
            }
            self.momentum
        };

        axes.get_mut(AxisId::Rwx).rotate_by(step.x);
        axes.get_mut(AxisId::Rwy).rotate_by(step.y);
    }

    /// Stop coasting (reset-all)
    pub fn reset(&mut self) {
        self.momentum = Vec2::ZERO;
    }
}
