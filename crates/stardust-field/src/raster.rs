//! CPU rasterizer for the star field.
//!
//! Evaluates [`shade`] once per pixel center. Used for headless snapshots.
//! The render crate's GPU readback test checks the WGSL program's star
//! geometry, layer weights, and orientation against the same math.

use glam::{Vec2, Vec4};

use crate::compositor::shade;
use crate::uniforms::GalaxyUniforms;

/// A straight-alpha RGBA float image, rows stored top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl Framebuffer {
    /// Shade every pixel of a `width` x `height` surface.
    ///
    /// Pixel `(x, y)` samples its center; `y` counts down from the top edge
    /// while the unit surface coordinate counts up from the bottom.
    pub fn render(width: u32, height: u32, uniforms: &GalaxyUniforms) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let v = 1.0 - (y as f32 + 0.5) / height as f32;
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                pixels.push(shade(Vec2::new(u, v), uniforms));
            }
        }
        log::debug!("rasterized {width}x{height} star field at t={}", uniforms.time);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y` (row 0 is the top edge).
    pub fn get(&self, x: u32, y: u32) -> Option<Vec4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Quantize to 8-bit RGBA, clamping each channel to `[0, 1]`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.to_array().map(quantize))
            .collect()
    }
}

fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
