//! WGSL program for the galaxy pass.
//!
//! Mirrors [`crate::compositor::shade`] step for step. The uniform struct
//! must stay in sync with [`crate::uniforms::GpuGalaxyUniforms`].

/// Vertex entry point of [`GALAXY_SHADER_SOURCE`].
pub const VERTEX_ENTRY: &str = "vs_galaxy";

/// Fragment entry point of [`GALAXY_SHADER_SOURCE`].
pub const FRAGMENT_ENTRY: &str = "fs_galaxy";

/// WGSL source: a fullscreen triangle plus the layered star field.
pub const GALAXY_SHADER_SOURCE: &str = r#"
struct GalaxyUniforms {
    resolution: vec3<f32>,
    time: f32,
    focal: vec2<f32>,
    rotation: vec2<f32>,
    mouse: vec2<f32>,
    star_speed: f32,
    density: f32,
    hue_shift: f32,
    speed: f32,
    glow_intensity: f32,
    saturation: f32,
    twinkle_intensity: f32,
    rotation_speed: f32,
    repulsion_strength: f32,
    mouse_active_factor: f32,
    auto_center_repulsion: f32,
    mouse_repulsion: u32,
    transparent: u32,
    _padding: f32,
};

@group(0) @binding(0)
var<uniform> galaxy: GalaxyUniforms;

const LAYER_COUNT: i32 = 3;
const STAR_THRESHOLD: f32 = 0.95;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_galaxy(@builtin(vertex_index) idx: u32) -> VertexOutput {
    // Fullscreen triangle; uv is 0..1 across the visible surface.
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));

    var out: VertexOutput;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

fn hash(p: vec2<f32>) -> f32 {
    return fract(sin(dot(p, vec2<f32>(127.1, 311.7))) * 43758.5453);
}

fn hsv2rgb(c: vec3<f32>) -> vec3<f32> {
    let k = vec4<f32>(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    let p = abs(fract(c.xxx + k.xyz) * 6.0 - k.www);
    return c.z * mix(k.xxx, clamp(p - k.xxx, vec3<f32>(0.0), vec3<f32>(1.0)), c.y);
}

fn sample_coordinate(uv: vec2<f32>) -> vec2<f32> {
    var st = (uv - 0.5) * 2.0;
    st.x *= galaxy.resolution.z;

    let angle = galaxy.time * galaxy.rotation_speed + atan2(galaxy.rotation.y, galaxy.rotation.x);
    let c = cos(angle);
    let s = sin(angle);
    st = mat2x2<f32>(c, -s, s, c) * st;

    if (galaxy.mouse_repulsion != 0u && galaxy.mouse_active_factor > 0.0) {
        var mouse = galaxy.mouse * 2.0 - 1.0;
        mouse.x *= galaxy.resolution.z;
        let away = st - mouse;
        let dist = length(away);
        if (dist < 1.0 && dist > 0.0) {
            let push = (1.0 - dist) * galaxy.repulsion_strength * galaxy.mouse_active_factor;
            st += (away / dist) * push;
        }
    }
    return st;
}

@fragment
fn fs_galaxy(in: VertexOutput) -> @location(0) vec4<f32> {
    let st = sample_coordinate(in.uv);

    var color = vec3<f32>(0.0);
    for (var i = 0; i < LAYER_COUNT; i++) {
        let layer = f32(i);
        let drift = galaxy.time * galaxy.star_speed * (1.0 + layer * 0.2);
        let p = st * (1.0 + layer * 0.5) * galaxy.density + vec2<f32>(drift);
        let star_hash = hash(floor(p) + layer * 100.0);

        if (star_hash > STAR_THRESHOLD) {
            let dist = length(fract(p) - 0.5);
            let falloff = max(0.0, 1.0 - dist * 2.0);
            var brightness = falloff * falloff;

            if (galaxy.twinkle_intensity > 0.0) {
                let twinkle = sin(galaxy.time * 10.0 + star_hash * 100.0) * 0.5 + 0.5;
                brightness *= mix(0.5, 1.0, twinkle * galaxy.twinkle_intensity);
            }

            let hue = fract(star_hash + galaxy.hue_shift / 360.0);
            let star = hsv2rgb(vec3<f32>(hue, galaxy.saturation, brightness));
            let glow = exp(-dist * 8.0) * galaxy.glow_intensity;
            color += (star + vec3<f32>(glow)) * (1.0 - layer * 0.3);
        }
    }

    if (galaxy.auto_center_repulsion > 0.0) {
        color *= mix(1.0, 1.0 - length(st) * 0.5, galaxy.auto_center_repulsion);
    }

    var alpha = 1.0;
    if (galaxy.transparent != 0u) {
        alpha = max(color.r, max(color.g, color.b));
    }
    return vec4<f32>(color, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_entry_points() {
        assert!(GALAXY_SHADER_SOURCE.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(GALAXY_SHADER_SOURCE.contains(&format!("fn {FRAGMENT_ENTRY}(")));
        assert!(GALAXY_SHADER_SOURCE.contains("@vertex"));
        assert!(GALAXY_SHADER_SOURCE.contains("@fragment"));
    }

    #[test]
    fn test_uniform_struct_lists_every_gpu_field_in_order() {
        let fields = [
            "resolution:",
            "time:",
            "focal:",
            "rotation:",
            "mouse:",
            "star_speed:",
            "density:",
            "hue_shift:",
            "speed:",
            "glow_intensity:",
            "saturation:",
            "twinkle_intensity:",
            "rotation_speed:",
            "repulsion_strength:",
            "mouse_active_factor:",
            "auto_center_repulsion:",
            "mouse_repulsion:",
            "transparent:",
            "_padding:",
        ];
        let start = GALAXY_SHADER_SOURCE.find("struct GalaxyUniforms").unwrap();
        let end = start + GALAXY_SHADER_SOURCE[start..].find("};").unwrap();
        let body = &GALAXY_SHADER_SOURCE[start..end];
        let mut cursor = 0;
        for field in fields {
            let at = body[cursor..]
                .find(field)
                .unwrap_or_else(|| panic!("{field} missing or out of order"));
            cursor += at + field.len();
        }
    }

    #[test]
    fn test_constants_match_compositor() {
        assert!(GALAXY_SHADER_SOURCE.contains(&format!(
            "const LAYER_COUNT: i32 = {};",
            crate::compositor::LAYER_COUNT
        )));
        assert!(GALAXY_SHADER_SOURCE.contains("const STAR_THRESHOLD: f32 = 0.95;"));
    }
}
