//! # Rewriter Module
//!
//! This module produces the new content for files that need a header and
//! writes it back to disk.
//!
//! Rendering is pure and always produces LF line endings, matching the
//! offsets reported by the scanner. Persisting goes through a temporary file in the same
//! directory that is renamed over the original, so a failed write leaves the
//! original file untouched.

use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

use crate::classifier::CommentMarkers;
use crate::header::CanonicalHeader;
use crate::scanner::{ScanResult, normalize_newlines};

/// Renders the rewritten content for `content`.
///
/// - [`ScanResult::Replaceable`]: everything before the start anchor and
///   everything after the end anchor is kept, and the block in between is
///   swapped for the canonical header.
/// - [`ScanResult::Missing`]: the header is wrapped in `markers` and prepended,
///   followed by a blank line.
///
/// Returns `None` for [`ScanResult::Approved`] and [`ScanResult::Foreign`],
/// which are never rewritten.
pub fn render(content: &str, scan: ScanResult, header: &CanonicalHeader, markers: &CommentMarkers) -> Option<String> {
  match scan {
    ScanResult::Replaceable { start, end } => Some(replace_block(content, start, end, header)),
    ScanResult::Missing => Some(insert_header(content, header, markers)),
    ScanResult::Approved | ScanResult::Foreign => None,
  }
}

/// Swaps the byte range `start..end` of `content` for the canonical header.
///
/// `start..end` indexes into the newline-normalized content, as returned by
/// [`crate::scanner::classify`].
pub fn replace_block(content: &str, start: usize, end: usize, header: &CanonicalHeader) -> String {
  let content = normalize_newlines(content);
  let prefix = &content[..start];
  let suffix = &content[end..];
  let mut rendered = String::with_capacity(prefix.len() + header.text().len() + suffix.len());
  rendered.push_str(prefix);
  rendered.push_str(header.text());
  rendered.push_str(suffix);
  rendered
}

/// Prepends the header wrapped in `markers`, followed by a blank line.
pub fn insert_header(content: &str, header: &CanonicalHeader, markers: &CommentMarkers) -> String {
  format!(
    "{}\n{}\n{}\n\n{}",
    markers.open,
    header.text(),
    markers.close,
    normalize_newlines(content)
  )
}

/// Replaces the file at `path` with `content`.
///
/// The new content is written in full to a sibling temporary file, which
/// takes over the original's permissions and is then renamed into place.
///
/// # Errors
///
/// Returns the underlying I/O error. The original file is unchanged on error.
pub fn persist(path: &Path, content: &str) -> std::io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let permissions = std::fs::metadata(path)?.permissions();

  let mut temp = NamedTempFile::new_in(dir)?;
  temp.write_all(content.as_bytes())?;
  temp.as_file().sync_all()?;
  temp.as_file().set_permissions(permissions)?;

  trace!("Renaming {} over {}", temp.path().display(), path.display());
  temp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
