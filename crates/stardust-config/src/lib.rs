//! Configuration system for Stardust.
//!
//! Galaxy, window, and debug settings persist to disk as a RON file. CLI
//! arguments parsed with clap override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, GalaxyConfig, WindowConfig};
pub use error::ConfigError;
