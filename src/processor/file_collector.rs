//! # File Collector Module
//!
//! This module walks the scan root and yields every regular file together
//! with the root-relative path used for exclusion and rule matching.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
  /// Path used to open the file.
  pub path: PathBuf,
  /// `./`-prefixed path relative to the scan root.
  pub relative: PathBuf,
}

/// File collector for directory traversal.
pub struct FileCollector {
  root: PathBuf,
}

impl FileCollector {
  /// Creates a new FileCollector for `root`.
  pub const fn new(root: PathBuf) -> Self {
    Self { root }
  }

  /// Walks the root recursively, in filesystem order, and returns every
  /// regular file. Entries that cannot be read are logged and skipped.
  pub fn collect(&self) -> Vec<CollectedFile> {
    let start_time = std::time::Instant::now();
    debug!("Scanning directory: {}", self.root.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(&self.root) {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Skipping unreadable entry: {e}");
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let relative = relative_to_root(entry.path(), &self.root);
      files.push(CollectedFile {
        path: entry.into_path(),
        relative,
      });
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }
}

/// Builds the `./`-prefixed relative path for `path` under `root`.
///
/// Exclusion patterns such as `.*/build/.*` rely on a separator being present
/// before the first directory, so top-level entries get a `.` component.
pub fn relative_to_root(path: &Path, root: &Path) -> PathBuf {
  let stripped = path.strip_prefix(root).unwrap_or(path);
  let mut relative = PathBuf::from(".");
  for component in stripped.components() {
    if matches!(component, std::path::Component::CurDir) {
      continue;
    }
    relative.push(component.as_os_str());
  }
  relative
}
