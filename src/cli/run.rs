//! # Run Command
//!
//! This module wires the CLI arguments to the processor and maps the run
//! result to the process exit status.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, warn};

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::header::CanonicalHeader;
use crate::{info_log, verbose_log};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_blank_line, print_failed_files, print_fatal, print_hint, print_start_message,
  print_summary,
};
use crate::processor::{Processor, ProcessorConfig, RunMode};
use crate::report::{ProcessingSummary, write_json_report};

/// Arguments for a run
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Run mode: omit to insert or replace headers in place, `ci` to only
  /// report files without the approved header
  #[arg(value_name = "MODE")]
  pub mode: Option<String>,

  /// Directory to scan recursively
  #[arg(long, short = 'r', value_name = "DIR", default_value = ".")]
  pub root: PathBuf,

  /// Path to config file (default: .headerfix.toml in the scan root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Canonical header file (overrides `header-file` from the config)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub header_file: Option<PathBuf>,

  /// Show, for each failing file, the change a local run would make (ci mode)
  #[arg(long)]
  pub show_diff: bool,

  /// Save the changes a local run would make to a file (ci mode)
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of all file outcomes to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and failing paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    require_equals = true,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  /// Nothing to do, or every needed rewrite was applied.
  Success,
  /// CI mode found files without the approved header.
  CheckFailed,
  /// A header inconsistency aborted the run.
  Aborted,
}

impl RunStatus {
  pub const fn code(self) -> u8 {
    match self {
      RunStatus::Success => 0,
      RunStatus::CheckFailed => 1,
      RunStatus::Aborted => 2,
    }
  }

  pub fn exit_code(self) -> ExitCode {
    ExitCode::from(self.code())
  }
}

/// Run with the given arguments.
///
/// I/O and configuration problems are returned as errors; header problems are
/// reported and mapped to a [`RunStatus`].
pub fn run_cli(args: RunArgs) -> Result<RunStatus> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let mode = RunMode::from_arg(args.mode.as_deref());
  debug!("Running in {} mode", mode.as_str());

  let config = load_config(args.config.as_deref(), &args.root, args.no_config)?;

  let header_path = args.header_file.unwrap_or_else(|| config.header_path(&args.root));
  let header = CanonicalHeader::load(&header_path)
    .with_context(|| format!("Failed to load canonical header from {}", header_path.display()))?;
  debug!(
    "Header anchors: start={:?}, end={:?}",
    header.start(),
    header.end()
  );
  if header.is_single_line() {
    verbose_log!("Header is a single line; existing blocks are never replaced, only inserted");
  }

  let exclusions = config.exclusion_set()?;
  let rules = config.rule_table();

  let diff_manager = match mode {
    RunMode::Ci => DiffManager::new(args.show_diff, args.save_diff),
    RunMode::Local => {
      if args.show_diff || args.save_diff.is_some() {
        warn!("--show-diff and --save-diff only apply in ci mode");
      }
      DiffManager::default()
    }
  };
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    root: args.root.clone(),
    header,
    rules,
    exclusions,
    mode,
    diff_manager,
  });

  print_start_message(processor.root(), processor.mode());
  let start_time = Instant::now();

  let report = match processor.run() {
    Ok(report) => report,
    Err(e) if e.is_inconsistency() => {
      print_fatal(&e);
      return Ok(RunStatus::Aborted);
    }
    Err(e) => return Err(e.into()),
  };

  let summary = ProcessingSummary::from_report(&report, start_time.elapsed());
  let failures: Vec<_> = report.failures().collect();

  print_blank_line();
  match mode {
    RunMode::Ci if !failures.is_empty() => print_failed_files(&failures),
    RunMode::Local if report.modified().next().is_some() => {}
    _ => print_all_files_ok(),
  }
  print_summary(&summary, mode);

  if let Some(ref output_path) = args.report_json {
    write_json_report(output_path, mode.as_str(), &report, &summary)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  if mode == RunMode::Ci && !failures.is_empty() {
    print_blank_line();
    print_hint();
    return Ok(RunStatus::CheckFailed);
  }

  Ok(RunStatus::Success)
}
