//! # Classifier Module
//!
//! This module decides, per file, whether it takes part in a run at all:
//! - [`ExclusionSet`] skips paths matching any exclusion regex
//! - [`RuleTable`] picks the comment markers used when a header is inserted
//!
//! Both are built once from configuration and are read-only afterwards.

use std::path::{MAIN_SEPARATOR_STR, Path};

use regex::Regex;
use serde::Deserialize;

/// Open and close delimiters wrapped around an inserted header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentMarkers {
  /// Comment-open marker, written on its own line above the header.
  pub open: String,
  /// Comment-close marker, written on its own line below the header.
  pub close: String,
}

impl CommentMarkers {
  pub fn new(open: &str, close: &str) -> Self {
    Self {
      open: open.to_string(),
      close: close.to_string(),
    }
  }
}

/// Ordered mapping from a file-type key to its comment markers.
///
/// A key is either an extension (`.cc`) or an exact file name
/// (`CMakeLists.txt`); both are matched as plain suffixes of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
  rules: Vec<(String, CommentMarkers)>,
}

impl Default for RuleTable {
  fn default() -> Self {
    Self::new(vec![
      (".cc".to_string(), CommentMarkers::new("/*", "*/")),
      (".h".to_string(), CommentMarkers::new("/*", "*/")),
      (".cs".to_string(), CommentMarkers::new("/*", "*/")),
      (".py".to_string(), CommentMarkers::new("\"\"\"", "\"\"\"")),
      (".proto".to_string(), CommentMarkers::new("/*", "*/")),
      ("CMakeLists.txt".to_string(), CommentMarkers::new("#[[", "]]")),
    ])
  }
}

impl RuleTable {
  /// Creates a table from `(key, markers)` pairs. Order is significant.
  pub const fn new(rules: Vec<(String, CommentMarkers)>) -> Self {
    Self { rules }
  }

  /// Returns the rules in declaration order.
  pub fn rules(&self) -> &[(String, CommentMarkers)] {
    &self.rules
  }

  /// Resolves the markers for `path`.
  ///
  /// Every key the path ends with (case-sensitive) is a candidate; the last
  /// candidate in table order wins. Returns `None` for unsupported files.
  pub fn resolve(&self, path: &Path) -> Option<(&str, &CommentMarkers)> {
    let path = path.to_string_lossy();
    self
      .rules
      .iter()
      .rev()
      .find(|(key, _)| path.ends_with(key.as_str()))
      .map(|(key, markers)| (key.as_str(), markers))
  }
}

/// Error returned when an exclusion pattern is not a valid regex.
#[derive(Debug, thiserror::Error)]
#[error("Invalid exclusion pattern '{pattern}': {source}")]
pub struct InvalidPatternError {
  pub pattern: String,
  pub source: regex::Error,
}

/// Default exclusion patterns, written with `/` as separator.
pub const DEFAULT_EXCLUDES: &[&str] = &[
  ".*/OpenVectorFormat/.*",
  ".*/build/.*",
  ".*/bin/.*",
  ".*/obj/.*",
  ".*/submodules/.*",
  ".*/.git/.*",
  ".*/.vs/.*",
];

/// Compiled exclusion patterns.
///
/// Patterns are anchored at the start of the path only, so `.*/build/.*`
/// matches `./build/x.h` and `./a/build/b/x.h` alike. A pattern does not have
/// to consume the whole path.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
  sources: Vec<String>,
  patterns: Vec<Regex>,
}

impl ExclusionSet {
  /// Compiles `patterns`, replacing every `/` with the platform separator.
  ///
  /// # Errors
  ///
  /// Returns an error naming the first pattern that fails to compile.
  pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, InvalidPatternError> {
    let separator = regex::escape(MAIN_SEPARATOR_STR);
    let mut sources = Vec::with_capacity(patterns.len());
    let mut compiled = Vec::with_capacity(patterns.len());

    for pattern in patterns {
      let pattern = pattern.as_ref();
      let native = pattern.replace('/', &separator);
      let regex = Regex::new(&format!("^(?:{native})")).map_err(|source| InvalidPatternError {
        pattern: pattern.to_string(),
        source,
      })?;
      sources.push(pattern.to_string());
      compiled.push(regex);
    }

    Ok(Self {
      sources,
      patterns: compiled,
    })
  }

  /// A set that excludes nothing.
  pub const fn empty() -> Self {
    Self {
      sources: Vec::new(),
      patterns: Vec::new(),
    }
  }

  /// The default exclusion list.
  pub fn with_defaults() -> Result<Self, InvalidPatternError> {
    Self::new(DEFAULT_EXCLUDES)
  }

  /// Returns `true` if `relative_path` matches any pattern.
  pub fn is_excluded(&self, relative_path: &Path) -> bool {
    let path = relative_path.to_string_lossy();
    self.patterns.iter().any(|pattern| pattern.is_match(&path))
  }

  /// Returns the first pattern (as written) that matches `relative_path`.
  pub fn matching_pattern(&self, relative_path: &Path) -> Option<&str> {
    let path = relative_path.to_string_lossy();
    self
      .patterns
      .iter()
      .position(|pattern| pattern.is_match(&path))
      .map(|index| self.sources[index].as_str())
  }

  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}
