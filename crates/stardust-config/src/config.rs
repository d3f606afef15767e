//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Galaxy background settings.
    pub galaxy: GalaxyConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Parameters of one galaxy renderer instance.
///
/// Immutable for the lifetime of a mounted renderer. Values read from disk
/// or the command line go through [`GalaxyConfig::sanitized`] before use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Focal point in unit surface coordinates.
    pub focal: [f32; 2],
    /// Base rotation vector; its angle is added to the animated rotation.
    pub rotation: [f32; 2],
    /// Star drift speed.
    pub star_speed: f32,
    /// Star grid density multiplier.
    pub density: f32,
    /// Hue shift in degrees.
    pub hue_shift: f32,
    /// Render a single static frame instead of animating.
    pub disable_animation: bool,
    /// Animation speed.
    pub speed: f32,
    /// Track the pointer over the surface.
    pub mouse_interaction: bool,
    /// Additive halo around each star.
    pub glow_intensity: f32,
    /// Star color saturation (0 = white stars).
    pub saturation: f32,
    /// Push stars away from the pointer.
    pub mouse_repulsion: bool,
    /// Strength of the pointer repulsion.
    pub repulsion_strength: f32,
    /// Per-star brightness flicker amount.
    pub twinkle_intensity: f32,
    /// Field rotation in radians per second.
    pub rotation_speed: f32,
    /// Center vignette amount.
    pub auto_center_repulsion: f32,
    /// Empty space is transparent instead of black.
    pub transparent: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Stardust".to_string(),
        }
    }
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            focal: [0.5, 0.5],
            rotation: [1.0, 0.0],
            star_speed: 0.5,
            density: 1.0,
            hue_shift: 140.0,
            disable_animation: false,
            speed: 1.0,
            mouse_interaction: true,
            glow_intensity: 0.3,
            saturation: 0.0,
            mouse_repulsion: true,
            repulsion_strength: 2.0,
            twinkle_intensity: 0.3,
            rotation_speed: 0.1,
            auto_center_repulsion: 0.0,
            transparent: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Clamp to a finite, non-negative value.
fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

impl GalaxyConfig {
    /// Returns a copy with density and speeds clamped to be non-negative and
    /// the hue shift wrapped into `[0, 360)`.
    pub fn sanitized(&self) -> Self {
        let hue_shift = if self.hue_shift.is_finite() {
            let wrapped = self.hue_shift.rem_euclid(360.0);
            // rem_euclid can round up to exactly 360.0 for tiny negatives
            if wrapped >= 360.0 { 0.0 } else { wrapped }
        } else {
            0.0
        };

        let sanitized = Self {
            star_speed: non_negative(self.star_speed),
            density: non_negative(self.density),
            speed: non_negative(self.speed),
            hue_shift,
            ..self.clone()
        };
        if sanitized != *self {
            log::debug!("Galaxy config sanitized: {:?}", sanitized);
        }
        sanitized
    }

    /// Pointer listeners are attached only when interaction is on and the
    /// field actually animates.
    pub fn pointer_enabled(&self) -> bool {
        self.mouse_interaction && !self.disable_animation
    }
}

pub const CONFIG_FILE_NAME: &str = "config.ron";

impl Config {
    /// Read `config.ron` from `config_dir`, writing a default one first if
    /// it does not exist yet. Fields missing from the file take defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = ron::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: config_dir.join(CONFIG_FILE_NAME),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized).map_err(write_err)
    }
}
