//! # Configuration Module
//!
//! This module provides configuration support for headerfix: where the
//! canonical header lives, which file types are checked and with which
//! comment markers, and which paths are excluded.
//!
//! Configuration is read from a `.headerfix.toml` file in the scan root (or
//! an explicit `--config` path). Every key is optional; anything left out
//! falls back to the built-in defaults.
//!
//! ```toml
//! header-file = "code_file_header.txt"
//! exclude = [".*/build/.*", ".*/third_party/.*"]
//!
//! [[file-types]]
//! key = ".rs"
//! open = "/*"
//! close = "*/"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::classifier::{CommentMarkers, ExclusionSet, InvalidPatternError, RuleTable};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerfix.toml";

/// The default header file name, relative to the scan root.
pub const DEFAULT_HEADER_FILENAME: &str = "code_file_header.txt";

/// One entry of the file-type table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileTypeConfig {
  /// Path suffix, either an extension (".cc") or an exact file name
  /// ("CMakeLists.txt").
  pub key: String,

  /// Comment-open marker written above an inserted header.
  pub open: String,

  /// Comment-close marker written below an inserted header.
  pub close: String,
}

/// Main configuration struct for headerfix.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Path to the canonical header. Relative paths are resolved against the
  /// scan root.
  #[serde(default)]
  pub header_file: Option<PathBuf>,

  /// Exclusion regexes. Replaces the default list when present.
  #[serde(default)]
  pub exclude: Option<Vec<String>>,

  /// Ordered file-type table. Replaces the default table when present.
  #[serde(default)]
  pub file_types: Option<Vec<FileTypeConfig>>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", path.display())]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{}': {source}", path.display())]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A file-type entry is invalid.
  #[error("Invalid file type '{key}': {message}")]
  InvalidFileType { key: String, message: String },

  /// An exclusion pattern does not compile.
  #[error(transparent)]
  InvalidPattern(#[from] InvalidPatternError),
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read, parsed
  /// or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    debug!(
      "Loaded config: header_file={:?}, {} exclusion patterns, {} file types",
      config.header_file,
      config.exclude.as_ref().map_or(0, Vec::len),
      config.file_types.as_ref().map_or(0, Vec::len)
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that file-type keys and markers are non-empty and that every
  /// exclusion pattern compiles.
  fn validate(&self) -> Result<(), ConfigError> {
    for file_type in self.file_types.iter().flatten() {
      if file_type.key.is_empty() {
        return Err(ConfigError::InvalidFileType {
          key: file_type.key.clone(),
          message: "key cannot be empty".to_string(),
        });
      }
      if file_type.open.is_empty() || file_type.close.is_empty() {
        return Err(ConfigError::InvalidFileType {
          key: file_type.key.clone(),
          message: "open and close markers cannot be empty".to_string(),
        });
      }
    }

    if let Some(ref patterns) = self.exclude {
      ExclusionSet::new(patterns)?;
    }

    Ok(())
  }

  /// Builds the file-type table, falling back to the default table.
  pub fn rule_table(&self) -> RuleTable {
    match self.file_types {
      Some(ref file_types) => RuleTable::new(
        file_types
          .iter()
          .map(|ft| (ft.key.clone(), CommentMarkers::new(&ft.open, &ft.close)))
          .collect(),
      ),
      None => RuleTable::default(),
    }
  }

  /// Compiles the exclusion patterns, falling back to the default list.
  pub fn exclusion_set(&self) -> Result<ExclusionSet, ConfigError> {
    let set = match self.exclude {
      Some(ref patterns) => ExclusionSet::new(patterns)?,
      None => ExclusionSet::with_defaults()?,
    };
    Ok(set)
  }

  /// Resolves the header file path against `root`.
  pub fn header_path(&self, root: &Path) -> PathBuf {
    let header_file = self
      .header_file
      .as_deref()
      .unwrap_or_else(|| Path::new(DEFAULT_HEADER_FILENAME));
    if header_file.is_absolute() {
      header_file.to_path_buf()
    } else {
      root.join(header_file)
    }
  }
}

/// Discover the configuration file path.
///
/// An explicit path takes priority; otherwise `.headerfix.toml` in the scan
/// root is used if it exists.
///
/// # Errors
///
/// Returns an error if an explicit path was given but does not exist.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Result<Option<PathBuf>> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Ok(Some(path.to_path_buf()));
    }
    anyhow::bail!("Config file not found: {}", path.display());
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using config: {}", root_config.display());
    return Ok(Some(root_config));
  }

  verbose_log!("No config file found, using defaults");
  Ok(None)
}

/// Load configuration from the discovered path, or return the default config.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from the CLI
/// * `root` - The scan root
/// * `no_config` - If true, skip config file discovery and use defaults
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, root)? {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
