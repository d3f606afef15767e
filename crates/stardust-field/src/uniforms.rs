//! Per-frame uniform snapshot shared by the CPU compositor and the GPU pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Smallest aspect ratio ever handed to the sampling transform.
pub const MIN_ASPECT_RATIO: f32 = 1.0e-3;

/// Surface resolution as consumed by the shading code: width, height, and
/// aspect ratio (the `xyz` of the resolution uniform).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
    pub aspect: f32,
}

impl Resolution {
    /// Build from pixel dimensions.
    ///
    /// A zero width or height would make the aspect ratio zero, infinite, or
    /// NaN; the ratio is clamped to [`MIN_ASPECT_RATIO`] instead.
    pub fn from_size(width: u32, height: u32) -> Self {
        let aspect = if width == 0 || height == 0 {
            MIN_ASPECT_RATIO
        } else {
            (width as f32 / height as f32).max(MIN_ASPECT_RATIO)
        };
        Self {
            width: width as f32,
            height: height as f32,
            aspect,
        }
    }

    /// The resolution uniform as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.width, self.height, self.aspect]
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::from_size(1, 1)
    }
}

/// Immutable uniform snapshot for one frame.
///
/// Rebuilt from scratch every tick and handed to the draw call; nothing
/// mutates it afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyUniforms {
    /// Elapsed animation time in seconds.
    pub time: f32,
    pub resolution: Resolution,
    /// Carried for parity with the host configuration; shading ignores it.
    pub focal: Vec2,
    /// Base rotation vector.
    pub rotation: Vec2,
    /// Derived drift speed (see the animation driver).
    pub star_speed: f32,
    pub density: f32,
    /// Hue shift in degrees.
    pub hue_shift: f32,
    /// Carried for parity with the host configuration; shading ignores it.
    pub speed: f32,
    /// Smoothed pointer position in unit surface coordinates.
    pub mouse: Vec2,
    pub glow_intensity: f32,
    pub saturation: f32,
    /// Pointer repulsion active (interaction and repulsion both enabled).
    pub mouse_repulsion: bool,
    pub twinkle_intensity: f32,
    pub rotation_speed: f32,
    pub repulsion_strength: f32,
    /// Smoothed pointer activity in `[0, 1]`.
    pub mouse_active_factor: f32,
    pub auto_center_repulsion: f32,
    pub transparent: bool,
}

impl Default for GalaxyUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            resolution: Resolution::default(),
            focal: Vec2::splat(0.5),
            rotation: Vec2::X,
            star_speed: 0.5,
            density: 1.0,
            hue_shift: 140.0,
            speed: 1.0,
            mouse: Vec2::splat(0.5),
            glow_intensity: 0.3,
            saturation: 0.0,
            mouse_repulsion: true,
            twinkle_intensity: 0.3,
            rotation_speed: 0.1,
            repulsion_strength: 2.0,
            mouse_active_factor: 0.0,
            auto_center_repulsion: 0.0,
            transparent: true,
        }
    }
}

impl GalaxyUniforms {
    /// Pack into the std140-compatible GPU layout.
    pub fn to_gpu(&self) -> GpuGalaxyUniforms {
        GpuGalaxyUniforms {
            resolution: self.resolution.to_array(),
            time: self.time,
            focal: self.focal.to_array(),
            rotation: self.rotation.to_array(),
            mouse: self.mouse.to_array(),
            star_speed: self.star_speed,
            density: self.density,
            hue_shift: self.hue_shift,
            speed: self.speed,
            glow_intensity: self.glow_intensity,
            saturation: self.saturation,
            twinkle_intensity: self.twinkle_intensity,
            rotation_speed: self.rotation_speed,
            repulsion_strength: self.repulsion_strength,
            mouse_active_factor: self.mouse_active_factor,
            auto_center_repulsion: self.auto_center_repulsion,
            mouse_repulsion: u32::from(self.mouse_repulsion),
            transparent: u32::from(self.transparent),
            _padding: 0.0,
        }
    }
}

/// GPU uniform buffer layout. Field order matches `GalaxyUniforms` in
/// [`crate::shader::GALAXY_SHADER_SOURCE`]; 96 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuGalaxyUniforms {
    pub resolution: [f32; 3],
    pub time: f32,
    pub focal: [f32; 2],
    pub rotation: [f32; 2],
    pub mouse: [f32; 2],
    pub star_speed: f32,
    pub density: f32,
    pub hue_shift: f32,
    pub speed: f32,
    pub glow_intensity: f32,
    pub saturation: f32,
    pub twinkle_intensity: f32,
    pub rotation_speed: f32,
    pub repulsion_strength: f32,
    pub mouse_active_factor: f32,
    pub auto_center_repulsion: f32,
    pub mouse_repulsion: u32,
    pub transparent: u32,
    pub _padding: f32,
}
