#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use headerfix::classifier::ExclusionSet;
use headerfix::header::CanonicalHeader;
use headerfix::processor::{Processor, ProcessorConfig, RunMode};
use tempfile::TempDir;

/// Canonical header used across the integration tests.
pub const HEADER: &str = "---- Copyright Start ----

MIT License

Copyright (c) 2022 Test Company

---- Copyright End ----";

/// Name of the header file written into fixture trees.
pub const HEADER_FILE: &str = "code_file_header.txt";

/// Creates an empty fixture tree containing only the header file.
pub fn setup_tree() -> Result<TempDir> {
  let temp_dir = tempfile::tempdir()?;
  fs::write(temp_dir.path().join(HEADER_FILE), format!("{HEADER}\n"))?;
  Ok(temp_dir)
}

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  Ok(fs::read_to_string(root.join(relative))?)
}

/// `content` with the canonical header inserted the way a local run does it.
pub fn with_block_header(open: &str, close: &str, content: &str) -> String {
  format!("{open}\n{HEADER}\n{close}\n\n{content}")
}

/// Builds a processor over `root` with the default rules and exclusions.
pub fn processor(root: &Path, mode: RunMode) -> Result<Processor> {
  let header = CanonicalHeader::load(&root.join(HEADER_FILE))?;
  Ok(Processor::new(ProcessorConfig {
    mode,
    exclusions: ExclusionSet::with_defaults()?,
    ..ProcessorConfig::new(root.to_path_buf(), header)
  }))
}

/// Root-relative path as the processor reports it.
pub fn rel(relative: &str) -> PathBuf {
  let mut path = PathBuf::from(".");
  for part in relative.split('/') {
    path.push(part);
  }
  path
}
