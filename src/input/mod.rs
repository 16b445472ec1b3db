//! Desktop input handling
//!
//! Key mapping, touch filtering and the simulated tilt sensor.

mod input_mapper;
mod tilt;
mod touch_gate;

pub use input_mapper::{InputAction, InputMapper, ParameterSteps};
pub use tilt::{SimulatedTilt, TiltSensorHost};
pub use touch_gate::{Region, TouchGate, TouchPhase, TouchTracker};
