//! Log output
//!
//! Installs the tracing subscriber for one invocation. The level comes from
//! the validated `log-level` option unless `RUST_LOG` is set; output goes to
//! `log-file` when one is configured, otherwise to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::defaults::FATAL_LOG_TARGET;
use crate::core::global_config::GlobalConfig;
use crate::core::log_level::LogLevel;

/// Filter for `level`, overridden by `RUST_LOG` when present
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.level_filter().into())
        .from_env_lossy()
}

/// Initialize logging from the global configuration
///
/// A subscriber that is already installed (e.g. by a test harness) is kept.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(config: &GlobalConfig) -> Result<()> {
    let filter = env_filter(config.level());

    if config.log_file().is_empty() {
        // The fatal boundary prints its error to stderr itself
        let filter = filter.add_directive(format!("{FATAL_LOG_TARGET}=off").parse()?);
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(());
    }

    let path = Path::new(config.log_file());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
