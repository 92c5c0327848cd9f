//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured default filter.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "booktrack.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logs to stderr. Used by the non-interactive commands.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_stderr(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")
}

/// Logs to a daily rolling file under `dir`, leaving the terminal to the UI.
///
/// Keep the returned guard alive for the lifetime of the program; dropping
/// it flushes and stops the background writer.
///
/// # Errors
/// Returns an error if the directory cannot be created or a global
/// subscriber is already installed.
pub fn init_file(dir: &Path, default_filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
