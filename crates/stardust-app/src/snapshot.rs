//! Headless rendering: one CPU-rasterized frame written as a PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use stardust_config::Config;
use stardust_field::Framebuffer;
use stardust_render::{BackendError, RenderBackend, SoftwareBackend, Viewport};
use tracing::info;

use crate::frame::FrameState;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot write an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("snapshot time must be a finite, non-negative number of seconds, got {0}")]
    InvalidTime(f32),

    #[error("rendering failed: {0}")]
    Render(#[from] BackendError),

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Render the configured galaxy at `time` seconds with the pointer idle in
/// the center, at the configured window size.
///
/// Animated configurations use the same time-derived drift speed a live
/// window would have at that moment; static ones ignore `time`.
pub fn render_snapshot(config: &Config, time: f32) -> Result<Framebuffer, SnapshotError> {
    if !time.is_finite() || time < 0.0 {
        return Err(SnapshotError::InvalidTime(time));
    }
    let galaxy = config.galaxy.sanitized();
    let animating = !galaxy.disable_animation;
    let viewport = Viewport::new(config.window.width, config.window.height);
    let (width, height) = viewport.size();

    let frame = if animating {
        let elapsed =
            Duration::try_from_secs_f32(time).map_err(|_| SnapshotError::InvalidTime(time))?;
        FrameState::new().advance(elapsed, [])
    } else {
        FrameState::new()
    };

    let mut backend = SoftwareBackend::new(width, height);
    backend.draw(&frame.uniforms(&galaxy, viewport.resolution(), animating))?;
    let framebuffer = backend.take_frame().ok_or(BackendError::ContextLost)?;
    backend.release();
    Ok(framebuffer)
}

/// Encode `frame` as an 8-bit RGBA PNG at `path`.
pub fn write_png(path: &Path, frame: &Framebuffer) -> Result<(), SnapshotError> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Err(SnapshotError::EmptyImage { width, height });
    }

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba8())?;
    writer.finish()?;

    info!(path = %path.display(), width, height, "snapshot written");
    Ok(())
}
