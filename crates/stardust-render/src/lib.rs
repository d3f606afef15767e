//! Galaxy rendering backends: the wgpu surface and fullscreen galaxy pass,
//! a CPU rasterizer with the same interface, and viewport bookkeeping.

pub mod backend;
pub mod galaxy_pipeline;
pub mod gpu;
pub mod pass;
pub mod viewport;

pub use backend::{BackendError, GpuBackend, RenderBackend, SoftwareBackend};
pub use galaxy_pipeline::GalaxyPipeline;
pub use gpu::{RenderContext, RenderContextError, SurfaceOptions, init_render_context_blocking};
pub use pass::{FrameEncoder, OPAQUE_BLACK, RenderPassBuilder, TRANSPARENT_BLACK};
pub use viewport::{MIN_SURFACE_DIMENSION, Viewport, ViewportResize};
