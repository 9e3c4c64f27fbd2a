//! # Processor Module
//!
//! This module contains the run controller: it walks the scan root, filters
//! each file through the classifier, scans it against the canonical header
//! and, in local mode, rewrites it.
//!
//! The module is organized into:
//! - [`file_collector`] - Directory traversal and root-relative paths
//!
//! The [`Processor`] never terminates the process. Fatal conditions come back
//! as a [`RunError`] and the caller decides how to exit.

mod file_collector;

use std::path::{Path, PathBuf};

pub use file_collector::{CollectedFile, FileCollector, relative_to_root};
use tracing::{debug, trace, warn};

use crate::classifier::{CommentMarkers, ExclusionSet, RuleTable};
use crate::diff::DiffManager;
use crate::header::CanonicalHeader;
use crate::output;
use crate::report::{FailureKind, FileOutcome, RunReport};
use crate::rewriter;
use crate::scanner::{self, MarkerOrderError, ScanResult};
use crate::verbose_log;

/// Run mode, fixed for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
  /// Rewrite files in place.
  #[default]
  Local,
  /// Report only; never modify files.
  Ci,
}

impl RunMode {
  /// Selects the mode from the first CLI argument.
  ///
  /// `ci` in any case selects [`RunMode::Ci`]; anything else, including no
  /// argument, selects [`RunMode::Local`].
  pub fn from_arg(arg: Option<&str>) -> Self {
    match arg {
      Some(value) if value.eq_ignore_ascii_case("ci") => RunMode::Ci,
      Some(value) => {
        warn!("Unknown mode '{value}', running in local mode");
        RunMode::Local
      }
      None => RunMode::Local,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      RunMode::Local => "local",
      RunMode::Ci => "ci",
    }
  }
}

/// A condition that aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  /// Header anchors appear in an order that cannot be resolved.
  #[error("[{}]: {source}", path.display())]
  MarkerOrder { path: PathBuf, source: MarkerOrderError },

  /// Copyright text that does not match the canonical anchors, found outside
  /// CI mode. Rewriting it could destroy unknown legal text.
  #[error("[{}]: found different copyright header - please remove", path.display())]
  ForeignHeader { path: PathBuf },

  /// A file could not be read.
  #[error("Failed to read file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  /// A rewritten file could not be written. The original is left untouched.
  #[error("Failed to write file {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

impl RunError {
  /// Whether this is a header inconsistency rather than an I/O failure.
  pub const fn is_inconsistency(&self) -> bool {
    matches!(self, RunError::MarkerOrder { .. } | RunError::ForeignHeader { .. })
  }
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Directory to scan.
  pub root: PathBuf,
  /// The approved header.
  pub header: CanonicalHeader,
  /// File-type rules.
  pub rules: RuleTable,
  /// Exclusion patterns.
  pub exclusions: ExclusionSet,
  /// Local or CI.
  pub mode: RunMode,
  /// Diff output for CI failures.
  pub diff_manager: DiffManager,
}

impl ProcessorConfig {
  /// Creates a local-mode config with the default rule table and no
  /// exclusions.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     mode: RunMode::Ci,
  ///     ..ProcessorConfig::new(root, header)
  /// }
  /// ```
  pub fn new(root: PathBuf, header: CanonicalHeader) -> Self {
    Self {
      root,
      header,
      rules: RuleTable::default(),
      exclusions: ExclusionSet::empty(),
      mode: RunMode::Local,
      diff_manager: DiffManager::default(),
    }
  }
}

/// Processor for checking and fixing license headers across a tree.
pub struct Processor {
  config: ProcessorConfig,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub const fn new(config: ProcessorConfig) -> Self {
    Self { config }
  }

  pub const fn mode(&self) -> RunMode {
    self.config.mode
  }

  pub fn root(&self) -> &Path {
    &self.config.root
  }

  /// Processes every file under the scan root.
  ///
  /// # Returns
  ///
  /// The accumulated [`RunReport`]. In CI mode, files without the approved
  /// header are recorded as failures and processing continues.
  ///
  /// # Errors
  ///
  /// Returns a [`RunError`] and stops at the first fatal condition. Files
  /// already rewritten before that point keep their new content.
  pub fn run(&self) -> Result<RunReport, RunError> {
    let collector = FileCollector::new(self.config.root.clone());
    let mut report = RunReport::new();

    for file in collector.collect() {
      let outcome = self.process_file(&file.path, &file.relative)?;
      report.record(file.relative, outcome);
    }

    Ok(report)
  }

  /// Processes a single file.
  ///
  /// # Parameters
  ///
  /// * `path` - Path used to read and write the file
  /// * `relative` - Root-relative path used for matching and reporting
  pub fn process_file(&self, path: &Path, relative: &Path) -> Result<FileOutcome, RunError> {
    if let Some(pattern) = self.config.exclusions.matching_pattern(relative) {
      verbose_log!("Skipping: {} (matches {})", relative.display(), pattern);
      return Ok(FileOutcome::Excluded);
    }

    let Some((key, markers)) = self.config.rules.resolve(relative) else {
      trace!("Unsupported file type: {}", relative.display());
      return Ok(FileOutcome::Unsupported);
    };
    debug!("Processing {} as {}", relative.display(), key);

    let content = std::fs::read_to_string(path).map_err(|source| RunError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let scan = scanner::classify(&content, &self.config.header);
    match self.config.mode {
      RunMode::Ci => Ok(self.check_file(relative, &content, scan, markers)),
      RunMode::Local => self.fix_file(path, relative, &content, scan, markers),
    }
  }

  /// CI mode: record anything but an approved header as a failure.
  fn check_file(
    &self,
    relative: &Path,
    content: &str,
    scan: Result<ScanResult, MarkerOrderError>,
    markers: &CommentMarkers,
  ) -> FileOutcome {
    let kind = match scan {
      Ok(ScanResult::Approved) => {
        verbose_log!("OK: {}", relative.display());
        return FileOutcome::Approved;
      }
      Ok(ScanResult::Replaceable { .. }) => FailureKind::Replaceable,
      Ok(ScanResult::Missing) => FailureKind::Missing,
      Ok(ScanResult::Foreign) => FailureKind::Foreign,
      Err(_) => FailureKind::MarkerOrder,
    };

    output::print_invalid(relative);

    if self.config.diff_manager.is_active()
      && let Ok(scan) = scan
      && let Some(proposed) = rewriter::render(content, scan, &self.config.header, markers)
      && let Err(e) = self.config.diff_manager.display_diff(relative, content, &proposed)
    {
      warn!("Could not write diff for {}: {e:#}", relative.display());
    }

    FileOutcome::Failed(kind)
  }

  /// Local mode: rewrite replaceable and missing headers; abort on anything
  /// that cannot be resolved automatically.
  fn fix_file(
    &self,
    path: &Path,
    relative: &Path,
    content: &str,
    scan: Result<ScanResult, MarkerOrderError>,
    markers: &CommentMarkers,
  ) -> Result<FileOutcome, RunError> {
    let scan = scan.map_err(|source| RunError::MarkerOrder {
      path: relative.to_path_buf(),
      source,
    })?;

    let (outcome, new_content) = match scan {
      ScanResult::Approved => {
        verbose_log!("OK: {}", relative.display());
        return Ok(FileOutcome::Approved);
      }
      ScanResult::Foreign => {
        return Err(RunError::ForeignHeader {
          path: relative.to_path_buf(),
        });
      }
      ScanResult::Replaceable { start, end } => (
        FileOutcome::Replaced,
        rewriter::replace_block(content, start, end, &self.config.header),
      ),
      ScanResult::Missing => (
        FileOutcome::Inserted,
        rewriter::insert_header(content, &self.config.header, markers),
      ),
    };

    rewriter::persist(path, &new_content).map_err(|source| RunError::Write {
      path: path.to_path_buf(),
      source,
    })?;

    if outcome == FileOutcome::Replaced {
      output::print_replaced(relative);
    } else {
      output::print_inserted(relative);
    }

    Ok(outcome)
  }
}
