//! Command-line argument parsing for Stardust.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Stardust command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "stardust", about = "Procedural galaxy background")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render one static frame instead of animating.
    #[arg(long = "static")]
    pub static_frame: bool,

    /// Draw on an opaque black background.
    #[arg(long)]
    pub opaque: bool,

    /// Hue shift in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub hue_shift: Option<f32>,

    /// Star grid density.
    #[arg(long)]
    pub density: Option<f32>,

    /// Star drift speed.
    #[arg(long)]
    pub star_speed: Option<f32>,

    /// Render headlessly to this PNG file and exit.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Elapsed time in seconds for the snapshot frame.
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.static_frame {
            self.galaxy.disable_animation = true;
        }
        if args.opaque {
            self.galaxy.transparent = false;
        }
        if let Some(hue) = args.hue_shift {
            self.galaxy.hue_shift = hue;
        }
        if let Some(density) = args.density {
            self.galaxy.density = density;
        }
        if let Some(speed) = args.star_speed {
            self.galaxy.star_speed = speed;
        }
    }
}
