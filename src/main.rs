//! # headerfix
//!
//! A tool that enforces a canonical license header across a source tree.

use std::process::ExitCode;

use anyhow::Result;
use headerfix::cli::{Cli, run_cli};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  let status = run_cli(cli.run_args)?;
  Ok(status.exit_code())
}
