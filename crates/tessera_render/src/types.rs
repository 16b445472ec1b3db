//! GPU-compatible data types for the line shader
//!
//! Layouts match `shaders/lines.wgsl` exactly. Uniform arrays need a 16-byte
//! stride, so each 2D point travels in a `vec4`.

use bytemuck::{Pod, Zeroable};
use tessera_core::{Frame, LineStyle};
use tessera_math::tesseract::CYCLE_LENGTH;

/// Smallest feather sent to the GPU; WGSL smoothstep is undefined for equal edges
const MIN_FEATHER: f32 = 1e-3;

/// Per-frame uniforms for the line pipeline
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineUniforms {
    /// Edge cycle walk in pixel coordinates (xy used)
    pub points: [[f32; 4]; CYCLE_LENGTH],
    pub line_color: [f32; 4],
    pub background: [f32; 4],
    /// Line thickness in pixels
    pub line_width: f32,
    /// Anti-alias band in pixels
    pub feather: f32,
    pub _padding: [f32; 2],
}

impl Default for LineUniforms {
    fn default() -> Self {
        Self {
            points: [[0.0; 4]; CYCLE_LENGTH],
            line_color: [1.0; 4],
            background: [0.0, 0.0, 0.0, 1.0],
            line_width: 2.0,
            feather: 1.0,
            _padding: [0.0; 2],
        }
    }
}

impl LineUniforms {
    /// Pack a frame's wireframe for upload
    pub fn from_frame(frame: &Frame, style: &LineStyle, line_color: [f32; 4], background: [f32; 4]) -> Self {
        let walk = frame.rasterizer.walk_points();
        Self {
            points: walk.map(|p| [p.x, p.y, 0.0, 0.0]),
            line_color,
            background,
            line_width: style.width,
            feather: style.feather.max(MIN_FEATHER),
            _padding: [0.0; 2],
        }
    }
}
