//! File logging setup.
//!
//! Events go to `<vitrola home>/vitrola.log` so the terminal UI is never
//! written over. `VITROLA_LOG` takes precedence over `[logging] level`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

/// Environment variable holding a filter directive (e.g. `debug`, `vitrola_core=trace`).
pub const LOG_ENV_VAR: &str = "VITROLA_LOG";

/// Builds the filter: env var first, then the configured level.
fn build_filter(config_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(config_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to the default log file.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes pending events.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_at(&paths::log_path(), &config.logging.level)
}

/// Installs the global subscriber writing to a specific file.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init_at(path: &Path, level: &str) -> Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .context("Log path has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
