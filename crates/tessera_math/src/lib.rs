//! 4D Mathematics Library
//!
//! Vector, rotation and hypercube types for the Tessera engine.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D vector with x, y, z, w components
//! - [`Vec2`] - projected screen-space point
//! - [`Mat4`] - 4x4 matrix built from plane-rotation generators
//!
//! ## Geometry
//!
//! - [`Tesseract4D`] - validated 16-vertex hypercube with a 33-index Euler cycle

mod vec4;
mod vec2;
pub mod angle;
pub mod mat4;
pub mod tesseract;

pub use vec4::Vec4;
pub use vec2::Vec2;
pub use mat4::Mat4;
pub use angle::{wrap_radians, normalize_degrees};
pub use tesseract::{Tesseract4D, TesseractData, DatasetError};
