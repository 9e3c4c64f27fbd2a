//! # Output Module
//!
//! This module centralizes all user-facing output for the headerfix tool.
//! Per-file decisions are printed to stdout as they are made, in the
//! `[<path>]: <decision>` form, so CI logs read top to bottom in traversal
//! order.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_quiet;
use crate::processor::{RunError, RunMode};
use crate::report::{FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// File rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Print the "Checking <root>..." or "Fixing headers in <root>..." message.
pub fn print_start_message(root: &Path, mode: RunMode) {
  if is_quiet() {
    return;
  }

  match mode {
    RunMode::Ci => println!("Checking headers in {}...", root.display()),
    RunMode::Local => println!("Fixing headers in {}...", root.display()),
  }
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// An anchored header block was replaced.
pub fn print_replaced(path: &Path) {
  if is_quiet() {
    return;
  }
  println!(
    "{} [{}]: replace header",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    path.display()
  );
}

/// A new header was prepended.
pub fn print_inserted(path: &Path) {
  if is_quiet() {
    return;
  }
  println!(
    "{} [{}]: insert new header",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    path.display()
  );
}

/// A file failed validation in CI mode.
///
/// Printed even in quiet mode, as the path alone, so that the output can be
/// piped into other tools.
pub fn print_invalid(path: &Path) {
  if is_quiet() {
    println!("{}", path.display());
    return;
  }
  println!(
    "{} [{}]: no or invalid copyright header.",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    path.display()
  );
}

/// Print the fatal error that aborted a run.
///
/// A foreign header is a per-file decision and goes to stdout with the other
/// decisions. Everything else goes to stderr.
pub fn print_fatal(error: &RunError) {
  match error {
    RunError::ForeignHeader { .. } => {
      println!("{} {}", symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()), error);
    }
    _ => eprintln!("{} {}", "ERROR:".if_supports_color(Stream::Stderr, |s| s.red()), error),
  }
}

/// Print the success message.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }
  println!(
    "{} All files have the approved header",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the list of files that failed CI validation, with the reason for
/// each.
pub fn print_failed_files(failures: &[&FileReport]) {
  if failures.is_empty() || is_quiet() {
    return;
  }

  let count = failures.len();
  println!(
    "{} {} {} failed header validation:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    if count == 1 { "file" } else { "files" }
  );

  for report in failures {
    let reason = match report.outcome {
      crate::report::FileOutcome::Failed(kind) => kind.describe(),
      _ => "",
    };
    println!(
      "  {} {}",
      report.path.display(),
      format!("({reason})").if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the remediation hint shown after CI failures.
pub fn print_hint() {
  if is_quiet() {
    return;
  }
  println!(
    "Invalid copyright headers found.  Please run the {} tool locally to fix and commit again.",
    env!("CARGO_PKG_NAME").if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

/// Print the summary line.
pub fn print_summary(summary: &ProcessingSummary, mode: RunMode) {
  if is_quiet() {
    return;
  }

  let mut parts = vec![format!("{} checked", summary.checked())];
  match mode {
    RunMode::Ci => {
      if summary.failed > 0 {
        parts.push(format!("{} failed", summary.failed));
      }
    }
    RunMode::Local => {
      if summary.inserted > 0 {
        parts.push(format!("{} inserted", summary.inserted));
      }
      if summary.replaced > 0 {
        parts.push(format!("{} replaced", summary.replaced));
      }
    }
  }
  if summary.excluded > 0 {
    parts.push(format!("{} excluded", summary.excluded));
  }

  println!(
    "{}",
    format!("{} in {}ms", parts.join(", "), summary.elapsed_ms).if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}
