//! # Scanner Module
//!
//! This module classifies a file's content against the canonical header.
//!
//! Detection is marker based and conservative: an existing block is only
//! considered replaceable when it is bounded by the canonical header's own
//! first and last lines. Any other text mentioning "copyright" is reported as
//! a foreign header and is never rewritten automatically.
//!
//! Content is compared with CRLF line endings read as LF, so a file and the
//! header match regardless of which line ending either was saved with.

use std::borrow::Cow;

use crate::header::CanonicalHeader;

/// Outcome of scanning one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResult {
  /// The canonical header occurs verbatim somewhere in the file.
  Approved,
  /// A header block bounded by the start and end anchors exists. `start..end`
  /// is the byte range to replace, from the first byte of the start anchor
  /// to the last byte of the end anchor.
  Replaceable { start: usize, end: usize },
  /// Copyright text that does not match the anchors.
  Foreign,
  /// No header-like content.
  Missing,
}

/// The end anchor was found before the start anchor, or the start anchor is
/// present without any end anchor.
///
/// This cannot be resolved safely and aborts a local run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("header markers out of order (start at byte {start}, end {})", describe_end(.end))]
pub struct MarkerOrderError {
  /// Byte offset of the first start anchor.
  pub start: usize,
  /// Byte offset of the first end anchor, if any.
  pub end: Option<usize>,
}

fn describe_end(end: &Option<usize>) -> String {
  match end {
    Some(offset) => format!("at byte {offset}"),
    None => "(missing)".to_string(),
  }
}

/// Classifies `content` against `header`.
///
/// Checks run in priority order: verbatim header, anchor ordering, anchored
/// block, then a case-insensitive "copyright" probe over the whole file.
///
/// Byte offsets in the result index into [`normalize_newlines`]`(content)`.
///
/// # Errors
///
/// Returns [`MarkerOrderError`] when the anchors are inverted.
pub fn classify(content: &str, header: &CanonicalHeader) -> Result<ScanResult, MarkerOrderError> {
  let content = normalize_newlines(content);
  let content = content.as_ref();

  if content.contains(header.text()) {
    return Ok(ScanResult::Approved);
  }

  let start = content.find(header.start());
  let end = content.find(header.end());

  match (start, end) {
    (Some(start), None) => Err(MarkerOrderError { start, end: None }),
    (Some(start), Some(end)) if start > end => Err(MarkerOrderError { start, end: Some(end) }),
    // An end anchor at byte 0 never makes a block replaceable.
    (Some(start), Some(end)) if end > 0 => Ok(ScanResult::Replaceable {
      start,
      end: end + header.end().len(),
    }),
    _ if contains_copyright(content) => Ok(ScanResult::Foreign),
    _ => Ok(ScanResult::Missing),
  }
}

/// Converts CRLF line endings to LF. Borrows when there is nothing to convert.
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
  if content.contains("\r\n") {
    Cow::Owned(content.replace("\r\n", "\n"))
  } else {
    Cow::Borrowed(content)
  }
}

/// Case-insensitive probe for the word "copyright".
pub fn contains_copyright(content: &str) -> bool {
  content.to_lowercase().contains("copyright")
}
