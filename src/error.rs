use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while saving a page.
///
/// A failure on the primary page fetch is fatal; individual resource
/// downloads report their errors through the snapshot report instead.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The target URL could not be parsed.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// A network-level failure (connection error, timeout) for a GET request.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A filesystem operation failed.
    #[error("filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A configuration file or string could not be deserialized.
    #[error("failed to load configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A resource detection rule carries an invalid pattern.
    #[error("invalid detection rule pattern: {0}")]
    Rule(#[from] regex::Error),
}

impl SnapshotError {
    /// Helper for wrapping IO errors with the path they occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
