//! Per-user directories for configuration and logs.
//!
//! Resolution follows OS conventions via `dirs` (XDG on Linux, Known Folders
//! on Windows, Library on macOS). Nothing is created until
//! [`PlatformDirs::create_dirs`] is called.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

pub const APP_NAME: &str = "stardust";

/// Where the application keeps its files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Rolling log files.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS locations without touching the filesystem.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        Ok(Self::with_root(&app_config))
    }

    /// Lay the directories out under `root`, e.g. the `--config` override
    /// or a test's temp dir.
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// [`with_root`](Self::with_root) when an override is given, otherwise
    /// [`resolve`](Self::resolve).
    pub fn resolve_or(root: Option<&Path>) -> Result<Self, PlatformError> {
        match root {
            Some(root) => Ok(Self::with_root(root)),
            None => Self::resolve(),
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
