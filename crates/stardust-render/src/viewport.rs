//! Viewport bookkeeping: the host container's pixel size, the surface size
//! actually configured, and the resolution uniform derived from them.
//!
//! Containers can legitimately report a zero width or height (minimized
//! windows, Wayland before the first configure). The surface is clamped to
//! 1×1 so wgpu never sees a zero extent, and the aspect ratio is clamped so
//! shading never sees NaN or infinity.

use stardust_field::Resolution;

/// Minimum surface dimension (prevents zero-size panics).
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Emitted when the viewport size actually changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportResize {
    /// Surface width in pixels, at least 1.
    pub surface_width: u32,
    /// Surface height in pixels, at least 1.
    pub surface_height: u32,
    pub resolution: Resolution,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Record a new container size. Returns `None` when nothing changed.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> Option<ViewportResize> {
        if width == self.width && height == self.height {
            return None;
        }
        self.width = width;
        self.height = height;
        log::debug!(
            "Viewport resized to {width}x{height} (aspect {})",
            self.resolution().aspect
        );
        Some(self.snapshot())
    }

    /// The resolution uniform for the current container size.
    pub fn resolution(&self) -> Resolution {
        Resolution::from_size(self.width, self.height)
    }

    /// Surface dimensions to configure, each clamped to at least 1.
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.width.max(MIN_SURFACE_DIMENSION),
            self.height.max(MIN_SURFACE_DIMENSION),
        )
    }

    /// Container size as reported, possibly zero.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the container currently has no visible area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn snapshot(&self) -> ViewportResize {
        let (surface_width, surface_height) = self.surface_size();
        ViewportResize {
            surface_width,
            surface_height,
            resolution: self.resolution(),
        }
    }
}
