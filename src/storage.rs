use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::SnapshotError;
use crate::utils::{directory_name, sanitize_filename};

/// Name of the saved page file inside the snapshot directory
pub const INDEX_FILE: &str = "index.html";

/// The snapshot's output directory on disk.
///
/// Created fresh for every run; resource subdirectories are created on
/// demand as the first resource of each kind is written.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Create the snapshot directory under `output_root`, named from the
    /// page title with a timestamp prefix
    pub fn create(output_root: &Path, title: &str) -> Result<Self, SnapshotError> {
        let path = output_root.join(directory_name(title));
        fs::create_dir_all(&path).map_err(|e| SnapshotError::io(&path, e))?;

        ::log::info!("Created snapshot directory: {}", path.display());
        Ok(Self { path })
    }

    /// Absolute location of the snapshot directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the page HTML as `index.html`, replacing any previous copy
    pub fn write_index(&self, html: &[u8]) -> Result<(), SnapshotError> {
        let path = self.path.join(INDEX_FILE);
        fs::write(&path, html).map_err(|e| SnapshotError::io(&path, e))
    }

    /// Write resource bytes under the given subdirectory and return the
    /// relative path to use in rewritten references
    pub fn write_resource(
        &self,
        subdir: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, SnapshotError> {
        let dir = self.path.join(subdir);
        fs::create_dir_all(&dir).map_err(|e| SnapshotError::io(&dir, e))?;

        let path = dir.join(filename);
        fs::write(&path, bytes).map_err(|e| SnapshotError::io(&path, e))?;

        // Relative paths in the HTML always use forward slashes
        Ok(format!("{}/{}", subdir, filename))
    }
}

/// Derive a local filename for a resource from its resolved URL.
///
/// Takes the last path segment and sanitizes it; resources without a usable
/// segment (e.g. a URL ending in `/`) get a placeholder name.
pub fn filename_for(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .unwrap_or_default();

    let sanitized = sanitize_filename(segment);
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_write_index() {
        let root = TempDir::new().unwrap();
        let output = OutputDir::create(root.path(), "My Page").unwrap();

        output.write_index(b"<html></html>").unwrap();

        let index = output.path().join(INDEX_FILE);
        assert!(index.exists());
        assert_eq!(fs::read(index).unwrap(), b"<html></html>");

        let dir_name = output.path().file_name().unwrap().to_str().unwrap();
        assert!(dir_name.ends_with("My_Page"));
    }

    #[test]
    fn test_write_resource_creates_subdir() {
        let root = TempDir::new().unwrap();
        let output = OutputDir::create(root.path(), "t").unwrap();

        let rel = output.write_resource("images", "cat.png", b"png-bytes").unwrap();

        assert_eq!(rel, "images/cat.png");
        assert_eq!(
            fs::read(output.path().join("images").join("cat.png")).unwrap(),
            b"png-bytes"
        );
    }

    #[test]
    fn test_index_overwrite() {
        let root = TempDir::new().unwrap();
        let output = OutputDir::create(root.path(), "t").unwrap();

        output.write_index(b"raw").unwrap();
        output.write_index(b"rewritten").unwrap();

        assert_eq!(fs::read(output.path().join(INDEX_FILE)).unwrap(), b"rewritten");
    }

    #[test]
    fn test_filename_for() {
        let url = Url::parse("https://example.com/a/b/photo.png?v=2").unwrap();
        assert_eq!(filename_for(&url), "photo.png");

        let url = Url::parse("https://example.com/dir/").unwrap();
        assert_eq!(filename_for(&url), "dir");

        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(filename_for(&url), "unnamed");
    }
}
