//! File logging. The terminal belongs to the TUI, so every event goes to a
//! daily file under `<data_local_dir>/ctxdo/logs`; old days are pruned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log level
pub const LOG_LEVEL_ENV: &str = "CTXDO_LOG_LEVEL";
/// Daily files kept before the oldest is deleted
pub const KEEP_LOG_FILES: usize = 7;

const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("no local data directory on this platform")]
    NoDataDir,
    #[error("could not create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not open log file: {0}")]
    Appender(#[from] InitError),
    #[error("logging already initialized: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging() -> Result<WorkerGuard, LoggingError> {
    let dir = log_directory()?;
    fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let (writer, guard) = tracing_appender::non_blocking(rolling_appender(&dir)?);
    let level = std::env::var(LOG_LEVEL_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(level.as_deref()))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}

/// `<data_local_dir>/ctxdo/logs`
pub fn log_directory() -> Result<PathBuf, LoggingError> {
    let data = dirs::data_local_dir().ok_or(LoggingError::NoDataDir)?;
    Ok(data.join("ctxdo").join("logs"))
}

/// `ctxdo.<date>.log` in `dir`, one file per day, at most `KEEP_LOG_FILES`.
fn rolling_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("ctxdo")
        .filename_suffix("log")
        .max_log_files(KEEP_LOG_FILES)
        .build(dir)
}

/// Filter for the crate and its dependencies. Unrecognized levels fall back
/// to `warn`.
fn log_filter(raw: Option<&str>) -> EnvFilter {
    let level = raw.and_then(parse_level).unwrap_or(DEFAULT_LEVEL);
    EnvFilter::new(format!("{level},ctxdo={level}"))
}

fn parse_level(raw: &str) -> Option<&'static str> {
    let level = match raw.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => "off",
        "error" => "error",
        "warn" | "warning" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        _ => return None,
    };
    Some(level)
}
