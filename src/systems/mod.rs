//! Application systems
//!
//! The window and the GPU presenter, kept out of main.rs so the event
//! handler only routes events.

mod render;
mod window;

pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
