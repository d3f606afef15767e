//! Layered star compositor.
//!
//! Each depth layer partitions sampling space into unit cells; a cell holds
//! a star when its hash clears [`STAR_THRESHOLD`]. Layers further back are
//! denser, drift faster, and contribute less light.

use glam::{Vec2, Vec3, Vec4};

use crate::color::hsv_to_rgb;
use crate::noise::{fract, hash};
use crate::transform::sample_coordinate;
use crate::uniforms::GalaxyUniforms;

/// Number of depth layers composited per sample.
pub const LAYER_COUNT: u32 = 3;

/// Cells whose hash exceeds this value contain a star (about 5% of cells).
pub const STAR_THRESHOLD: f32 = 0.95;

/// Hash offset between layers so they do not share star positions.
const LAYER_SEED_STRIDE: f32 = 100.0;

/// Falloff rate of the glow halo.
const GLOW_FALLOFF: f32 = 8.0;

/// One star as seen from a single sample point. Never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarCell {
    /// Integer grid coordinate of the cell.
    pub cell: Vec2,
    /// Cell hash, also the star's identity for hue and twinkle phase.
    pub hash: f32,
    /// Distance from the sample point to the cell center.
    pub distance: f32,
    /// Brightness after falloff and twinkle.
    pub brightness: f32,
    /// Hue in `[0, 1)`.
    pub hue: f32,
    /// Additive halo term.
    pub glow: f32,
}

impl StarCell {
    /// Star color before layer attenuation.
    pub fn color(&self, saturation: f32) -> Vec3 {
        hsv_to_rgb(Vec3::new(self.hue, saturation, self.brightness)) + Vec3::splat(self.glow)
    }
}

/// Whether a grid cell in the given layer contains a star.
pub fn is_star_cell(cell: Vec2, layer: u32) -> bool {
    layer_hash(cell, layer as f32) > STAR_THRESHOLD
}

fn layer_hash(cell: Vec2, layer: f32) -> f32 {
    hash(cell + layer * LAYER_SEED_STRIDE)
}

/// Scale and drift `st` into the given layer's grid space.
fn layer_coordinate(st: Vec2, layer: f32, uniforms: &GalaxyUniforms) -> Vec2 {
    let drift = uniforms.time * uniforms.star_speed * (1.0 + layer * 0.2);
    st * (1.0 + layer * 0.5) * uniforms.density + Vec2::splat(drift)
}

/// Evaluate the star (if any) covering sampling coordinate `st` in `layer`.
pub fn star_cell(layer: u32, st: Vec2, uniforms: &GalaxyUniforms) -> Option<StarCell> {
    let p = layer_coordinate(st, layer as f32, uniforms);
    let star_hash = layer_hash(p.floor(), layer as f32);
    (star_hash > STAR_THRESHOLD).then(|| light(p, star_hash, uniforms))
}

/// Light the cell covering `st` in `layer` as if it held a star with the
/// given hash, skipping the occupancy test.
///
/// With zero saturation and no twinkle the hash drops out of the color, so
/// this gives the exact light a star would add at `st` whichever cells end
/// up occupied.
pub fn light_cell(layer: u32, st: Vec2, star_hash: f32, uniforms: &GalaxyUniforms) -> StarCell {
    light(layer_coordinate(st, layer as f32, uniforms), star_hash, uniforms)
}

/// Attenuation applied to a layer's light; deeper layers are dimmer.
pub fn layer_weight(layer: u32) -> f32 {
    1.0 - layer as f32 * 0.3
}

fn light(p: Vec2, star_hash: f32, uniforms: &GalaxyUniforms) -> StarCell {
    let offset = Vec2::new(fract(p.x), fract(p.y)) - 0.5;
    let distance = offset.length();

    let falloff = (1.0 - distance * 2.0).max(0.0);
    let mut brightness = falloff * falloff;
    if uniforms.twinkle_intensity > 0.0 {
        let twinkle = (uniforms.time * 10.0 + star_hash * 100.0).sin() * 0.5 + 0.5;
        brightness *= 0.5 + 0.5 * (twinkle * uniforms.twinkle_intensity);
    }

    StarCell {
        cell: p.floor(),
        hash: star_hash,
        distance,
        brightness,
        hue: fract(star_hash + uniforms.hue_shift / 360.0),
        glow: (-distance * GLOW_FALLOFF).exp() * uniforms.glow_intensity,
    }
}

/// Shade one unit surface coordinate, returning straight (non-premultiplied)
/// RGBA.
///
/// Pure: identical inputs always give a bit-identical color.
pub fn shade(uv: Vec2, uniforms: &GalaxyUniforms) -> Vec4 {
    let st = sample_coordinate(uv, uniforms);

    let mut color = Vec3::ZERO;
    for layer in 0..LAYER_COUNT {
        if let Some(star) = star_cell(layer, st, uniforms) {
            color += star.color(uniforms.saturation) * layer_weight(layer);
        }
    }

    if uniforms.auto_center_repulsion > 0.0 {
        let dimmed = 1.0 - st.length() * 0.5;
        color *= 1.0 + (dimmed - 1.0) * uniforms.auto_center_repulsion;
    }

    let alpha = if uniforms.transparent {
        color.max_element()
    } else {
        1.0
    };
    color.extend(alpha)
}
