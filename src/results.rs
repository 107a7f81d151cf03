use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::resources::ResourceKind;

/// A resource that was downloaded and saved locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResource {
    /// Absolute URL the resource was fetched from
    pub remote_url: String,

    /// Path of the saved copy, relative to the snapshot directory
    pub local_path: String,

    /// Kind of resource
    pub kind: ResourceKind,
}

/// Outcome of a snapshot run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotReport {
    /// URL of the page that was saved
    pub url: String,

    /// Title extracted from the page
    pub title: String,

    /// Directory the snapshot was written to
    pub output_dir: PathBuf,

    /// Resources that were downloaded and rewritten to local paths
    pub saved: Vec<SavedResource>,

    /// Resource URLs whose download failed (left pointing at the remote URL)
    pub failed: Vec<String>,

    /// Resource URLs skipped because the time budget ran out
    pub skipped: Vec<String>,
}

impl SnapshotReport {
    /// Total number of references the page carried
    pub fn total_references(&self) -> usize {
        self.saved.len() + self.failed.len() + self.skipped.len()
    }
}
