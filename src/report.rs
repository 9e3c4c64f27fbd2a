//! # Report Module
//!
//! This module holds the per-file outcomes of a run and the run-level
//! accumulator returned by the processor. It can also write the outcomes as a
//! JSON report for CI artifacts.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Why a file failed header validation in CI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
  /// No header at all.
  Missing,
  /// An outdated header bounded by the canonical anchors.
  Replaceable,
  /// Copyright text that does not match the anchors.
  Foreign,
  /// Header anchors in the wrong order.
  MarkerOrder,
}

impl FailureKind {
  pub const fn describe(self) -> &'static str {
    match self {
      FailureKind::Missing => "missing header",
      FailureKind::Replaceable => "outdated header",
      FailureKind::Foreign => "foreign copyright header",
      FailureKind::MarkerOrder => "header markers out of order",
    }
  }
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "action", content = "reason")]
pub enum FileOutcome {
  /// Already carries the canonical header.
  Approved,
  /// Matched an exclusion pattern.
  Excluded,
  /// No file-type rule applies.
  Unsupported,
  /// An anchored header block was replaced.
  Replaced,
  /// A new header was prepended.
  Inserted,
  /// Failed validation (CI mode only).
  Failed(FailureKind),
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path relative to the scan root, as used for exclusion matching
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// Outcome for the file
  #[serde(flatten)]
  pub outcome: FileOutcome,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Accumulates file reports over one run.
#[derive(Debug, Default)]
pub struct RunReport {
  files: Vec<FileReport>,
}

impl RunReport {
  pub const fn new() -> Self {
    Self { files: Vec::new() }
  }

  /// Records the outcome for `path`.
  pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
    self.files.push(FileReport { path, outcome });
  }

  /// All reports, in traversal order.
  pub fn files(&self) -> &[FileReport] {
    &self.files
  }

  /// Files that failed validation.
  pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
    self
      .files
      .iter()
      .filter(|report| matches!(report.outcome, FileOutcome::Failed(_)))
  }

  /// Files whose content was rewritten.
  pub fn modified(&self) -> impl Iterator<Item = &FileReport> {
    self
      .files
      .iter()
      .filter(|report| matches!(report.outcome, FileOutcome::Replaced | FileOutcome::Inserted))
  }

  /// `true` when no file failed validation.
  pub fn is_success(&self) -> bool {
    self.failures().next().is_none()
  }

  /// The outcome recorded for `path`, if any.
  pub fn outcome_of(&self, path: &Path) -> Option<FileOutcome> {
    self
      .files
      .iter()
      .find(|report| report.path == path)
      .map(|report| report.outcome)
  }
}

/// Summary counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
  pub total: usize,
  pub approved: usize,
  pub excluded: usize,
  pub unsupported: usize,
  pub replaced: usize,
  pub inserted: usize,
  pub failed: usize,
  pub elapsed_ms: u64,
}

impl ProcessingSummary {
  /// Counts the outcomes in `report`.
  pub fn from_report(report: &RunReport, elapsed: Duration) -> Self {
    let mut summary = Self {
      total: report.files().len(),
      elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      ..Self::default()
    };

    for file in report.files() {
      match file.outcome {
        FileOutcome::Approved => summary.approved += 1,
        FileOutcome::Excluded => summary.excluded += 1,
        FileOutcome::Unsupported => summary.unsupported += 1,
        FileOutcome::Replaced => summary.replaced += 1,
        FileOutcome::Inserted => summary.inserted += 1,
        FileOutcome::Failed(_) => summary.failed += 1,
      }
    }

    summary
  }

  /// Number of files that were checked against the header.
  pub const fn checked(&self) -> usize {
    self.approved + self.replaced + self.inserted + self.failed
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  mode: &'a str,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes a JSON report of a run to `output_path`.
///
/// # Parameters
///
/// * `output_path` - Where the report is written
/// * `mode` - Run mode label included in the report
/// * `report` - Outcomes of the run
/// * `summary` - Summary counts for the run
pub fn write_json_report(
  output_path: &Path,
  mode: &str,
  report: &RunReport,
  summary: &ProcessingSummary,
) -> Result<()> {
  let json = JsonReport {
    generated_at: Local::now().to_rfc3339(),
    mode,
    summary,
    files: report.files(),
  };

  let content = serde_json::to_string_pretty(&json).with_context(|| "Failed to serialize JSON report")?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
