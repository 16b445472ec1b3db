//! Input channels for the Tessera engine
//!
//! Every channel writes only the rotation axes it owns:
//!
//! - [`InputFusionEngine`] - pointer velocity and force into `rx`/`ry`, wheel into `rwy`
//! - [`DeviceOrientationAdapter`] - gyroscope into the camera axes
//! - [`TouchGestureAdapter`] - touch drag into `rwx`/`rwy`
//!
//! Host callbacks accumulate into [`InputSample`], which the animation loop
//! drains once per frame.

pub mod axes;
pub mod sample;
pub mod fusion;
pub mod orientation;
pub mod gesture;

pub use axes::{AxisId, AxisParseError, MotionLimits, RotationAxis, RotationAxisSet};
pub use sample::{FrameInput, InputSample, OrientationReading};
pub use fusion::{FusionConfig, InputFusionEngine, WheelConfig};
pub use orientation::{DeviceOrientationAdapter, OrientationConfig, OrientationState};
pub use gesture::{GestureConfig, TouchGestureAdapter};
