//! The drawing seam between the animation driver and a graphics API.
//!
//! [`RenderBackend`] is what a mounted galaxy draws through. [`GpuBackend`]
//! renders with wgpu onto a window surface; [`SoftwareBackend`] runs the
//! same shading on the CPU for headless snapshots and tests.

use std::sync::Arc;

use stardust_field::{Framebuffer, GalaxyUniforms};
use winit::window::Window;

use crate::galaxy_pipeline::GalaxyPipeline;
use crate::gpu::{RenderContext, RenderContextError, SurfaceOptions, init_render_context_blocking};
use crate::pass::FrameEncoder;

/// Why a frame could not be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The graphics context is gone (surface lost beyond recovery, device
    /// destroyed, or the backend was already released).
    #[error("graphics context lost")]
    ContextLost,

    /// GPU ran out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Surface acquisition timed out; the frame can be skipped.
    #[error("timeout")]
    Timeout,
}

impl BackendError {
    /// Whether drawing can continue on later frames.
    pub fn is_recoverable(self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// A drawing target for the galaxy.
pub trait RenderBackend {
    /// Resize the drawing surface. Zero dimensions are allowed.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame from an immutable uniform snapshot.
    fn draw(&mut self, uniforms: &GalaxyUniforms) -> Result<(), BackendError>;

    /// Free all graphics resources. Calling this more than once is harmless.
    fn release(&mut self);
}

struct GpuResources {
    context: RenderContext,
    pipeline: GalaxyPipeline,
}

/// wgpu-backed renderer presenting to a window surface.
pub struct GpuBackend {
    resources: Option<GpuResources>,
}

impl GpuBackend {
    /// Create the device, surface, and galaxy pipeline for `window`.
    pub fn new(window: Arc<Window>, options: SurfaceOptions) -> Result<Self, RenderContextError> {
        let context = init_render_context_blocking(window, options)?;
        let pipeline = GalaxyPipeline::new(&context.device, context.surface_format, options.transparent);
        Ok(Self {
            resources: Some(GpuResources { context, pipeline }),
        })
    }
}

impl RenderBackend for GpuBackend {
    fn resize(&mut self, width: u32, height: u32) {
        if let Some(resources) = self.resources.as_mut() {
            resources.context.resize(width, height);
        }
    }

    fn draw(&mut self, uniforms: &GalaxyUniforms) -> Result<(), BackendError> {
        let GpuResources { context, pipeline } =
            self.resources.as_ref().ok_or(BackendError::ContextLost)?;

        let texture = context.get_current_texture()?;
        pipeline.update(&context.queue, uniforms);

        let builder = pipeline.pass_builder();
        let mut frame = FrameEncoder::new(&context.device, &context.queue, texture);
        if let Some(mut pass) = frame.begin_render_pass(&builder) {
            pipeline.render(&mut pass);
        }
        frame.submit();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(GpuResources { context, pipeline }) = self.resources.take() {
            drop(pipeline);
            context.destroy();
        }
    }
}

impl Drop for GpuBackend {
    fn drop(&mut self) {
        self.release();
    }
}

/// CPU renderer that keeps the most recent frame in memory.
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    width: u32,
    height: u32,
    last_frame: Option<Framebuffer>,
    draw_count: u64,
    release_count: u32,
    released: bool,
}

impl SoftwareBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The most recently drawn frame, if any.
    pub fn last_frame(&self) -> Option<&Framebuffer> {
        self.last_frame.as_ref()
    }

    /// Take ownership of the most recent frame.
    pub fn take_frame(&mut self) -> Option<Framebuffer> {
        self.last_frame.take()
    }

    /// Number of successful draws.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Number of times resources were actually freed (0 or 1).
    pub fn release_count(&self) -> u32 {
        self.release_count
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl RenderBackend for SoftwareBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self, uniforms: &GalaxyUniforms) -> Result<(), BackendError> {
        if self.released {
            return Err(BackendError::ContextLost);
        }
        self.last_frame = Some(Framebuffer::render(self.width, self.height, uniforms));
        self.draw_count += 1;
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.release_count += 1;
        self.last_frame = None;
        log::debug!("Software backend released after {} draws", self.draw_count);
    }
}
