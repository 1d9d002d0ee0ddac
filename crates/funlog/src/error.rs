//! Error types

use std::path::PathBuf;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while configuring loggers.
///
/// Nothing is retried or degraded: the operation that hit the error fails
/// and the error is handed back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the log directory, the marker file, or a log file failed
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Logger name that cannot be used as a file stem
    #[error("invalid logger name: {0:?}")]
    InvalidName(String),

    /// Level name that does not map onto a known level
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// Format template that cannot be compiled
    #[error("invalid format template {template:?}: {reason}")]
    InvalidFormat { template: String, reason: String },

    /// A global subscriber is already installed for this process
    #[error("failed to install global subscriber: {0}")]
    SubscriberInstall(String),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}
