//! Tracing setup.
//!
//! CLI subcommands log to stderr. The TUI owns the terminal, so it logs to
//! `<cache_dir>/wayfile/wayfile.log` instead.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "wayfile=info";
const LOG_FILE: &str = "wayfile.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr, for non-interactive subcommands.
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Directory holding the TUI log file.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("wayfile")
}

/// Log to a file through a non-blocking writer.
///
/// The returned guard flushes buffered lines on drop and must live as long
/// as the session. Returns `None` when the log directory cannot be created;
/// the session then runs without logging.
pub fn init_file() -> Option<WorkerGuard> {
    let dir = log_dir();
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("wayfile: failed to create log dir {}: {err}", dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Some(guard)
}
