//! Procedural galaxy star field: hash noise, the pointer-aware sampling
//! transform, and the layered star compositor.
//!
//! Everything here is a pure function of its inputs so the same math can be
//! evaluated on the CPU (tests, headless snapshots) and mirrored by the WGSL
//! program in [`shader`].

pub mod color;
pub mod compositor;
pub mod noise;
pub mod raster;
pub mod shader;
pub mod transform;
pub mod uniforms;

pub use color::hsv_to_rgb;
pub use compositor::{
    LAYER_COUNT, STAR_THRESHOLD, StarCell, is_star_cell, layer_weight, light_cell, shade, star_cell,
};
pub use noise::{fract, hash, noise};
pub use raster::Framebuffer;
pub use shader::GALAXY_SHADER_SOURCE;
pub use transform::{pointer_position, repel, rotate, rotation_angle, sample_coordinate};
pub use uniforms::{GalaxyUniforms, GpuGalaxyUniforms, MIN_ASPECT_RATIO, Resolution};
