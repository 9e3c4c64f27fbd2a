//! # Header Module
//!
//! This module loads the canonical license header that every source file must
//! carry. The header is read once per run and is immutable afterwards.
//!
//! CRLF line endings are read as LF. Beyond that, only leading and trailing
//! newline characters are stripped. Interior text, including indentation and
//! trailing spaces on a line, is kept as-is because files are compared against
//! the header byte for byte.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::scanner::normalize_newlines;

/// Error type for header loading.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The header file could not be read.
  #[error("Failed to read header file '{}': {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  /// The header file contains nothing but newlines.
  #[error("Header file '{}' is empty", path.display())]
  Empty { path: PathBuf },
}

/// The approved license header, plus the two anchor lines used to locate an
/// older header block that should be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeader {
  text: String,
  start: String,
  end: String,
}

impl CanonicalHeader {
  /// Loads and normalizes the header stored at `path`.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::Read`] if the file is missing or unreadable and
  /// [`HeaderError::Empty`] if nothing is left after normalization.
  pub fn load(path: &Path) -> Result<Self, HeaderError> {
    debug!("Loading canonical header from {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|source| HeaderError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    Self::from_text(&raw).ok_or_else(|| HeaderError::Empty {
      path: path.to_path_buf(),
    })
  }

  /// Builds a header from in-memory text, applying the same normalization as
  /// [`CanonicalHeader::load`]. Returns `None` for an empty header.
  pub fn from_text(raw: &str) -> Option<Self> {
    let normalized = normalize_newlines(raw);
    let text = normalized.trim_matches(|c| c == '\n' || c == '\r');
    if text.is_empty() {
      return None;
    }

    let start = text.split('\n').next().unwrap_or(text);
    let end = text.rsplit('\n').next().unwrap_or(text);

    Some(Self {
      text: text.to_string(),
      start: start.to_string(),
      end: end.to_string(),
    })
  }

  /// The full normalized header text.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// First line of the header; marks where a replaceable block begins.
  pub fn start(&self) -> &str {
    &self.start
  }

  /// Last line of the header; marks where a replaceable block ends.
  pub fn end(&self) -> &str {
    &self.end
  }

  /// Whether the header is a single line, in which case start and end anchors
  /// are the same string.
  pub fn is_single_line(&self) -> bool {
    !self.text.contains('\n')
  }
}
