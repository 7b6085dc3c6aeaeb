//! Error types for skillsync.
//!
//! Library crates use [`SkillSyncError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all skillsync operations.
#[derive(Debug, thiserror::Error)]
pub enum SkillSyncError {
    /// The upstream server answered with a non-success status.
    #[error("failed to fetch {url}: {status}")]
    Fetch { url: String, status: String },

    /// Transport-level HTTP failure (DNS, TLS, connection, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Markdown serialization error.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid built-in configuration value.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SkillSyncError>;

impl SkillSyncError {
    /// Create a fetch error from the requested URL and the response status.
    pub fn fetch(url: impl Into<String>, status: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            status: status.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
