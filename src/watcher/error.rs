//! Watcher error types.

use std::path::PathBuf;

/// Errors that can occur while tailing the log.
#[derive(thiserror::Error, Debug)]
pub enum WatcherError {
    /// Log file does not exist at startup.
    #[error("Log file {0} does not exist")]
    FileNotFound(PathBuf),

    /// Watched file was deleted.
    #[error("Watched file deleted: {0}")]
    FileDeleted(PathBuf),

    /// Permission denied accessing file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
