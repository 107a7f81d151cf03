// Re-export modules
pub mod config;
pub mod error;
pub mod fetcher;
pub mod parsers;
pub mod resources;
pub mod results;
pub mod rewriter;
pub mod snapshot;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::SnapshotError;
pub use results::{SavedResource, SnapshotReport};

use std::path::{Path, PathBuf};

use config::SnapshotConfig;

/// Main builder for saving a single page and its resources
pub struct Snapshot {
    config: SnapshotConfig,
}

impl Snapshot {
    /// Create a new Snapshot builder for the given URL
    pub fn new(url: &str) -> Self {
        Self {
            config: SnapshotConfig::new(url),
        }
    }

    /// Set the wall-clock budget (in seconds) for resource downloads
    pub fn with_time_limit(mut self, seconds: u64) -> Self {
        self.config.time_limit_secs = seconds;
        self
    }

    /// Set the directory the snapshot directory is created under
    pub fn with_output_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_root = path.into();
        self
    }

    /// Set the timeout (in seconds) applied to each individual request
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_secs = seconds;
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: SnapshotConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, SnapshotError> {
        self.config = SnapshotConfig::from_file(path)?;
        Ok(self)
    }

    /// Apply configuration from a JSON string
    pub fn with_config_str(mut self, json: &str) -> Result<Self, SnapshotError> {
        self.config = serde_json::from_str(json)?;
        Ok(self)
    }

    /// Run the pipeline: fetch, parse, download, rewrite, save
    pub async fn run(self) -> Result<SnapshotReport, SnapshotError> {
        snapshot::run(&self.config).await
    }
}
