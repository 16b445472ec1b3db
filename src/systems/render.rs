//! GPU rendering system
//!
//! Presents engine frames on the window surface with the line pipeline.

use std::sync::Arc;
use winit::window::Window;

use tessera_core::{Frame, LineStyle, Presenter};
use tessera_render::{ContextError, LinePipeline, LineUniforms, RenderContext};

use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// GPU setup failed
    Context(ContextError),
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Draws the wireframe on the window surface
pub struct RenderSystem {
    context: RenderContext,
    pipeline: LinePipeline,
    line_style: LineStyle,
    line_color: [f32; 4],
    background: [f32; 4],
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &RenderingConfig, vsync: bool) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let pipeline = LinePipeline::new(&context.device, context.config.format);

        Ok(Self {
            context,
            pipeline,
            line_style: config.line,
            line_color: config.line_color,
            background: config.background_color,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

impl Presenter for RenderSystem {
    type Error = RenderError;

    fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let uniforms = LineUniforms::from_frame(frame, &self.line_style, self.line_color, self.background);
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Line Encoder"),
            });

        self.pipeline.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
