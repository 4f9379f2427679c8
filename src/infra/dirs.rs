//! Platform-specific directory management
//!
//! Provides the path of the configuration directory holding the profile file.
//! Follows XDG Base Directory Specification on Linux and standard locations on macOS.
//!
//! `QUICKBASE_CONFIG_DIR` overrides the default directory.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::defaults::CONFIG_FILE_NAME;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "QUICKBASE_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "quickbase";

/// Platform-specific directory provider for qbcli
#[derive(Debug, Clone)]
pub struct QbDirs {
    config_dir: PathBuf,
}

impl QbDirs {
    /// Create a new `QbDirs` instance
    ///
    /// Checks the environment variable first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/quickbase` or `~/.config/quickbase`
    /// - macOS: `~/Library/Application Support/quickbase`
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the profile file path
    ///
    /// Returns the path to `config.toml` in the config directory.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Resolve config directory from environment or platform default
    fn resolve_config_dir() -> PathBuf {
        match env::var(ENV_CONFIG_DIR) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::platform_config_dir(),
        }
    }

    /// Get platform-specific config directory
    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for QbDirs {
    fn default() -> Self {
        Self::new()
    }
}
