//! GPU presentation for Tessera
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`line_pipeline::LinePipeline`] - Fullscreen distance-field wireframe shading
//! - [`types::LineUniforms`] - Per-frame uniform block built from a [`tessera_core::Frame`]

pub mod context;
pub mod line_pipeline;
pub mod types;

pub use context::{ContextError, RenderContext};
pub use line_pipeline::LinePipeline;
pub use types::LineUniforms;
