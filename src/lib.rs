//! # headerfix
//!
//! A tool that keeps the copyright/license header of every source file in a
//! repository identical to one canonical header.
//!
//! In local mode `headerfix` inserts the header into files that have none and
//! replaces outdated headers bounded by the canonical header's first and last
//! lines. In CI mode it only reports files that do not carry the approved
//! header. Copyright text it does not recognise is never rewritten.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use headerfix::classifier::ExclusionSet;
//! use headerfix::header::CanonicalHeader;
//! use headerfix::processor::{Processor, ProcessorConfig, RunMode};
//!
//! fn main() -> anyhow::Result<()> {
//!   let header = CanonicalHeader::load("code_file_header.txt".as_ref())?;
//!
//!   let processor = Processor::new(ProcessorConfig {
//!     mode: RunMode::Ci,
//!     exclusions: ExclusionSet::with_defaults()?,
//!     ..ProcessorConfig::new(PathBuf::from("."), header)
//!   });
//!
//!   let report = processor.run()?;
//!   for failure in report.failures() {
//!     println!("{}", failure.path.display());
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Loading the canonical header
//! * [`classifier`] - Exclusion patterns and file-type rules
//! * [`scanner`] - Classifying file content against the header
//! * [`rewriter`] - Inserting or replacing headers and persisting files
//! * [`processor`] - Walking the tree and driving a run
//!
//! [`header`]: crate::header
//! [`classifier`]: crate::classifier
//! [`scanner`]: crate::scanner
//! [`rewriter`]: crate::rewriter
//! [`processor`]: crate::processor

pub mod classifier;
pub mod cli;
pub mod config;
pub mod diff;
pub mod header;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod rewriter;
pub mod scanner;
