//! Process-wide logging.
//!

use std::{fs::create_dir_all, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, subscriber::set_global_default};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        self,
        format::{DefaultFields, Format},
    },
    layer::SubscriberExt,
    registry,
};

/// The most verbose level that is logged.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Where logs go and how much is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogSettings {
    /// The directory daily log files are written to.
    pub directory: PathBuf,

    #[serde(default)]
    #[allow(missing_docs)]
    pub level: LogLevel,

    /// The number of daily log files kept before the oldest is removed.
    #[serde(default = "default_retained_files")]
    pub retained_files: usize,
}

fn default_retained_files() -> usize {
    90
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            level: LogLevel::default(),
            retained_files: default_retained_files(),
        }
    }
}

/// A formatting layer over a non-blocking writer.
pub(crate) fn writer_layer<S>(
    writer: NonBlocking,
    ansi: bool,
) -> fmt::Layer<S, DefaultFields, Format, NonBlocking> {
    fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
}

/// Create and set the global loggers.
///
/// Logs go to stdout and to `<file_prefix>.<date>.log` in the configured
/// directory. The returned guards flush on drop and must be held until exit.
pub fn init_logger(
    settings: &LogSettings,
    file_prefix: &str,
) -> Result<Vec<WorkerGuard>, LoggerError> {
    create_dir_all(&settings.directory).map_err(LoggerError::CreateDirectory)?;

    let appender = RollingFileAppender::builder()
        .filename_prefix(file_prefix)
        .filename_suffix("log")
        .rotation(Rotation::DAILY)
        .max_log_files(settings.retained_files)
        .build(&settings.directory)?;

    let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(io::stdout());

    let filter = Targets::new().with_default(Level::from(settings.level));
    let subscriber = registry()
        .with(writer_layer(file_writer, false))
        .with(writer_layer(stdout_writer, true))
        .with(filter);

    set_global_default(subscriber)?;

    Ok(vec![file_guard, stdout_guard])
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to create rolling appender:\n{0}")]
    CreateRollingAppender(#[from] tracing_appender::rolling::InitError),

    #[error("Failed to create log directory:\n{0}")]
    CreateDirectory(#[source] io::Error),

    #[error("A global logger was already set:\n{0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::{LogLevel, LogSettings};

    #[test]
    fn level_names() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(Level::from(level), Level::DEBUG);
    }

    #[test]
    fn settings_defaults() {
        let settings: LogSettings =
            serde_json::from_str(r#"{ "directory": "/var/log/backups" }"#).unwrap();

        assert_eq!(settings.level, LogLevel::Info);
        assert_eq!(settings.retained_files, 90);
    }
}
