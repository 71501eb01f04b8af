use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Job Monitor.
///
/// Malformed log lines are deliberately absent: they are an expected input
/// condition handled inside the parser, not a fault.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The job event log could not be opened or read.
    #[error("Failed to read log file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report file could not be written.
    #[error("Failed to write report file {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MonitorError>;
