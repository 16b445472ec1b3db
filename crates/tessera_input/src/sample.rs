//! Between-frame input accumulation
//!
//! Host callbacks may fire zero, one or many times between two ticks. They
//! only accumulate into [`InputSample`]; the animation loop drains it exactly
//! once per tick, so deltas never pile up across frames.

use tessera_math::Vec2;

/// Raw device orientation in degrees, as reported by the host sensor API
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationReading {
    /// Compass heading, 0..360
    pub alpha: f32,
    /// Front-back tilt
    pub beta: f32,
    /// Left-right tilt
    pub gamma: f32,
}

impl OrientationReading {
    pub const fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Everything one tick consumes, produced by [`InputSample::drain`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Centered pointer position (-0.5..0.5), `None` when the pointer is outside
    pub pointer_position: Option<Vec2>,
    /// Pointer movement since the previous tick, in centered units
    pub pointer_motion: Vec2,
    /// Wheel lines scrolled since the previous tick
    pub wheel: f32,
    /// Latest orientation reading since the previous tick
    pub orientation: Option<OrientationReading>,
    /// Viewport-normalized touch drag since the previous tick
    pub touch_drag: Vec2,
}

/// Producer-side accumulator
#[derive(Debug, Default)]
pub struct InputSample {
    pointer_position: Option<Vec2>,
    pointer_motion: Vec2,
    wheel: f32,
    orientation: Option<OrientationReading>,
    touch_drag: Vec2,
}

impl InputSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position given in viewport-normalized units (0..1).
    ///
    /// The first position after entering only establishes the reference
    /// point; movement is accumulated from the second event on.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let centered = Vec2::new(x.clamp(0.0, 1.0) - 0.5, y.clamp(0.0, 1.0) - 0.5);
        if let Some(previous) = self.pointer_position {
            self.pointer_motion = self.pointer_motion + (centered - previous);
        }
        self.pointer_position = Some(centered);
    }

    /// The pointer left the surface: no more constant force
    pub fn pointer_left(&mut self) {
        self.pointer_position = None;
    }

    pub fn wheel(&mut self, lines: f32) {
        self.wheel += lines;
    }

    /// Keep only the latest reading; orientation is a level, not a delta
    pub fn orientation(&mut self, reading: OrientationReading) {
        self.orientation = Some(reading);
    }

    /// Accumulate a drag delta already normalized by the viewport size
    pub fn touch_drag(&mut self, dx: f32, dy: f32) {
        self.touch_drag = self.touch_drag + Vec2::new(dx, dy);
    }

    /// Drop pending touch deltas (touch source switched off)
    pub fn discard_touch(&mut self) {
        self.touch_drag = Vec2::ZERO;
    }

    /// Drop pending orientation reading (listener removed)
    pub fn discard_orientation(&mut self) {
        self.orientation = None;
    }

    /// Take this tick's input and reset the per-tick accumulators.
    ///
    /// The pointer position persists across ticks because it is a level
    /// that keeps applying force while the pointer rests off-center.
    pub fn drain(&mut self) -> FrameInput {
        let frame = FrameInput {
            pointer_position: self.pointer_position,
            pointer_motion: self.pointer_motion,
            wheel: self.wheel,
            orientation: self.orientation.take(),
            touch_drag: self.touch_drag,
        };
        self.pointer_motion = Vec2::ZERO;
        self.wheel = 0.0;
        self.touch_drag = Vec2::ZERO;
        frame
    }

    /// Discard everything, including the pointer position
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
