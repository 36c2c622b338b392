//! Logging setup.
//!
//! The TUI owns the terminal, so events go to a log file through a
//! non-blocking `tracing-appender` writer. Keep the returned guard alive for
//! the lifetime of the process or buffered lines are lost on exit.

use std::fs;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LOG_ENV, LogConfig};

/// Noisy dependency targets capped below the configured level.
const QUIET_TARGETS: &[(&str, &str)] = &[("hyper", "warn"), ("reqwest", "warn"), ("h2", "warn")];

/// Builds the filter from `ROSTER_LOG` if set, otherwise from `[log].level`.
///
/// # Errors
/// Returns an error if the directive string is invalid.
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    let base = std::env::var(LOG_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| level.to_string());

    let mut directives = vec![base];
    for (target, lvl) in QUIET_TARGETS {
        directives.push(format!("{target}={lvl}"));
    }

    let filter = directives.join(",");
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter '{filter}'"))
}

/// Installs the global subscriber writing to the configured log file.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    let path = config.effective_file();
    let dir = path
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_default();
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?
        .to_os_string();

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(build_env_filter(&config.level)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(file = %path.display(), "logging initialized");
    Ok(guard)
}
