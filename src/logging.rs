//! File logging via `tracing`.
//!
//! The terminal belongs to the TUI, so everything goes to a daily-rotated
//! file under the state directory instead of stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_dir};

/// Directory the log file is written to.
pub fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings
        .directory
        .clone()
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Filter from `RUST_LOG`, else the configured level, else `info`.
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit or
/// buffered lines are lost.
pub fn init(settings: &LoggingSettings) -> anyhow::Result<WorkerGuard> {
    let dir = log_dir(settings);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&dir, &settings.file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(env_filter(settings))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}
