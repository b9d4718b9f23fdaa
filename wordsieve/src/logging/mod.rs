//! Structured logging infrastructure for wordsieve.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels and an optional log file.
//! Console logs go to stderr; stdout is reserved for the run summary.

mod formatters;

pub use formatters::DevelopmentFormatter;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use is_terminal::IsTerminal;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),

    /// General error
    Other(String),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Keeps the background log-file writer alive.
///
/// Buffered file output is flushed when the guard is dropped, so hold it
/// until the program exits.
#[derive(Debug, Default)]
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Calling this after a global subscriber has been installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<LogGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LogGuard::default());
    }

    let level = log_level_to_level(config.level);

    let Some(LogSink {
        writer,
        ansi,
        file_guard,
    }) = select_sink(config, std::io::stderr().is_terminal())?
    else {
        return Ok(LogGuard::default());
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(ansi);

    match config.format {
        LogFormat::Json => builder
            .json()
            .with_target(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .try_init()?,
        LogFormat::Compact => builder.compact().with_target(true).try_init()?,
        LogFormat::Pretty => builder
            .pretty()
            .with_target(true)
            .with_line_number(true)
            .try_init()?,
        LogFormat::Default => builder
            .event_format(DevelopmentFormatter::new(ansi))
            .try_init()?,
    }

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Where formatted events are written.
struct LogSink {
    writer: BoxMakeWriter,
    ansi: bool,
    file_guard: Option<WorkerGuard>,
}

/// Pick the log destination. A configured file takes precedence over the
/// console; colours are only used on a terminal.
fn select_sink(config: &LoggingConfig, stderr_is_terminal: bool) -> Result<Option<LogSink>> {
    if let Some(file_path) = &config.file {
        let (writer, guard) = create_non_blocking_file(file_path)?;
        return Ok(Some(LogSink {
            writer: BoxMakeWriter::new(writer),
            ansi: false,
            file_guard: Some(guard),
        }));
    }

    if !config.stdout {
        return Ok(None);
    }

    Ok(Some(LogSink {
        writer: BoxMakeWriter::new(std::io::stderr),
        ansi: stderr_is_terminal,
        file_guard: None,
    }))
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(
    path: impl AsRef<Path>,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    // Ensure the directory exists
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::Other(format!("Invalid log file path: {}", path.display())))?;

    let file_appender = tracing_appender::rolling::never(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        file_name,
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for LogError {}
