//! # Logging Module
//!
//! This module provides logging utilities for the headerfix tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - The `tracing` subscriber used for diagnostic output
//!
//! Per-file decisions are user-facing and go to stdout. Verbose logs and
//! tracing diagnostics go to stderr so stdout stays predictable in CI logs.
//!
//! ## Example
//!
//! ```rust
//! use headerfix::logging::{ColorMode, set_verbose};
//! use headerfix::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Goes to stderr
//! verbose_log!("Skipping: {}", "./build/gen.h");
//!
//! // Goes to stdout
//! info_log!("[{}]: insert new header", "./src/a.h");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, highlighted when colors are enabled.
///
/// Used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
