//! `tracing` subscriber setup.
//!
//! The terminal game logs to a file so the UI is never overdrawn; the
//! simulator logs to stderr.

use crate::config::project_dirs;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "duel.log";

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Directory the game writes its log file to.
pub fn log_directory() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("elemental-duel"))
}

/// File logging for the terminal game. Keep the returned guard alive for
/// the life of the program so buffered lines are flushed.
pub fn init_file_logging(default_filter: &str) -> std::io::Result<WorkerGuard> {
    let dir = log_directory();
    fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", dir.join(LOG_FILE).display());
    Ok(guard)
}

/// Stderr logging for command-line tools.
pub fn init_stderr_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .init();
}
