//! Per-tick animation state and the uniform snapshot built from it.

use std::time::Duration;

use glam::Vec2;
use stardust_config::GalaxyConfig;
use stardust_field::{GalaxyUniforms, Resolution};
use stardust_input::{PointerEvent, PointerState};

/// Everything that changes from one animation tick to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    /// Elapsed animation time in seconds.
    pub time: f64,
    pub pointer: PointerState,
}

impl FrameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state after one tick: time advances by `delta`, queued pointer
    /// commands retarget the pointer, then the pointer takes one smoothing
    /// step.
    #[must_use]
    pub fn advance(self, delta: Duration, events: impl IntoIterator<Item = PointerEvent>) -> Self {
        let mut pointer = self.pointer;
        pointer.apply_all(events);
        pointer.step();
        Self {
            time: self.time + delta.as_secs_f64(),
            pointer,
        }
    }

    /// Build this frame's uniform snapshot.
    ///
    /// While animating, the drift speed handed to the shader is recomputed
    /// from elapsed time as `time * star_speed / 10`, so drift accelerates
    /// over the session. Static frames use the configured speed as is.
    pub fn uniforms(
        &self,
        config: &GalaxyConfig,
        resolution: Resolution,
        animating: bool,
    ) -> GalaxyUniforms {
        let time = self.time as f32;
        let star_speed = if animating {
            (self.time * f64::from(config.star_speed) / 10.0) as f32
        } else {
            config.star_speed
        };

        GalaxyUniforms {
            time,
            resolution,
            focal: Vec2::from_array(config.focal),
            rotation: Vec2::from_array(config.rotation),
            star_speed,
            density: config.density,
            hue_shift: config.hue_shift,
            speed: config.speed,
            mouse: self.pointer.position(),
            glow_intensity: config.glow_intensity,
            saturation: config.saturation,
            mouse_repulsion: config.mouse_interaction && config.mouse_repulsion,
            twinkle_intensity: config.twinkle_intensity,
            rotation_speed: config.rotation_speed,
            repulsion_strength: config.repulsion_strength,
            mouse_active_factor: self.pointer.activity(),
            auto_center_repulsion: config.auto_center_repulsion,
            transparent: config.transparent,
        }
    }
}
