//! Error types for the svcmgr-core library.

use thiserror::Error;

/// Result type alias for svcmgr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while supervising service processes.
#[derive(Error, Debug)]
pub enum Error {
    /// Start was requested for a service that already has a live process.
    #[error("{service} is already running")]
    AlreadyRunning { service: String },

    /// Stop was requested for a service with no live process.
    #[error("{service} is not running")]
    NotRunning { service: String },

    /// Failed to spawn a child process.
    #[error("Failed to launch process: {0}")]
    Launch(String),

    /// Failed to terminate a running process.
    #[error("Failed to terminate process {pid}: {reason}")]
    Terminate { pid: u32, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the two expected precondition violations (already running on
    /// start, not running on stop). These are reported states, not faults:
    /// callers typically log them and carry on.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::AlreadyRunning { .. } | Error::NotRunning { .. }
        )
    }
}
