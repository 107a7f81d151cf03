use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// Configuration for a page snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// URL of the page to save
    pub start_url: String,

    /// Wall-clock budget in seconds for resource downloads
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,

    /// Directory under which the snapshot directory is created
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Timeout in seconds applied to each individual HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl SnapshotConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            time_limit_secs: default_time_limit_secs(),
            output_root: default_output_root(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let mut file = File::open(&path)
            .map_err(|e| SnapshotError::io(path.as_ref().to_path_buf(), e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| SnapshotError::io(path.as_ref().to_path_buf(), e))?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// The whole-run download budget as a duration
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// The per-request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Default value for time_limit_secs
fn default_time_limit_secs() -> u64 {
    4
}

/// Default output root (the current working directory)
fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    4
}

/// Default User-Agent string
fn default_user_agent() -> String {
    concat!("save-page/", env!("CARGO_PKG_VERSION")).to_string()
}
