//! Surface-to-sampling-space transform: centering, aspect correction,
//! rotation, and pointer repulsion.

use glam::{Mat2, Vec2};

use crate::uniforms::GalaxyUniforms;

/// Radius (in sampling units) inside which the pointer pushes stars away.
pub const REPULSION_RADIUS: f32 = 1.0;

/// Current field rotation: the animated part plus the angle of the base
/// rotation vector.
pub fn rotation_angle(uniforms: &GalaxyUniforms) -> f32 {
    uniforms.time * uniforms.rotation_speed + uniforms.rotation.y.atan2(uniforms.rotation.x)
}

/// Apply the field rotation matrix, columns `(cos, -sin)` and `(sin, cos)`.
pub fn rotate(st: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Mat2::from_cols(Vec2::new(cos, -sin), Vec2::new(sin, cos)) * st
}

/// The smoothed pointer mapped into centered, aspect-corrected space.
///
/// The pointer is not rotated with the field.
pub fn pointer_position(uniforms: &GalaxyUniforms) -> Vec2 {
    let mut pos = uniforms.mouse * 2.0 - 1.0;
    pos.x *= uniforms.resolution.aspect;
    pos
}

/// Push `st` away from the pointer.
///
/// The displacement is `(1 - dist) * strength * activity`, so it fades to
/// nothing at the repulsion radius and as pointer activity decays. Points
/// at or beyond the radius, or exactly under the pointer, are returned
/// unchanged.
pub fn repel(st: Vec2, uniforms: &GalaxyUniforms) -> Vec2 {
    if !uniforms.mouse_repulsion || uniforms.mouse_active_factor <= 0.0 {
        return st;
    }
    let away = st - pointer_position(uniforms);
    let dist = away.length();
    if dist >= REPULSION_RADIUS {
        return st;
    }
    let push = (1.0 - dist) * uniforms.repulsion_strength * uniforms.mouse_active_factor;
    st + away.normalize_or_zero() * push
}

/// Map a unit surface coordinate into the space the star layers sample.
pub fn sample_coordinate(uv: Vec2, uniforms: &GalaxyUniforms) -> Vec2 {
    let mut st = (uv - 0.5) * 2.0;
    st.x *= uniforms.resolution.aspect;
    let st = rotate(st, rotation_angle(uniforms));
    repel(st, uniforms)
}
