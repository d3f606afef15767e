//! The `stardust` binary.
//!
//! Opens a window with the animated galaxy, or with `--snapshot <PATH>`
//! renders a single frame to a PNG without opening a window.
//!
//! ```text
//! stardust --width 1920 --height 1080 --hue-shift 200
//! stardust --snapshot sky.png --time 12.5
//! ```

use std::process::ExitCode;

use clap::Parser;
use stardust_app::platform::PlatformDirs;
use stardust_app::{render_snapshot, window, write_png};
use stardust_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve_or(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    stardust_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "starting stardust");

    if let Some(path) = &args.snapshot {
        let result = render_snapshot(&config, args.time).and_then(|frame| write_png(path, &frame));
        return match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Snapshot failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match window::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
