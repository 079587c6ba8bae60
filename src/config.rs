//! Run configuration.
//!
//! Everything the original tool hard-coded (the recognized extensions, the
//! ignored directory names, the output file names) is a config value with the
//! same default. The binary loads an optional TOML file, applies command-line
//! overrides, and hands the result to [`crate::pipeline`]. Library code never
//! reads global state.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [scan]
//! extensions = [".png", ".jpg", ".jpeg", ".svg", ".webp"]
//! ignore_dirs = ["node_modules", "dist", "build", "coverage", "out"]
//! follow_links = true
//!
//! [output]
//! table = "image_files.csv"
//! gallery = "image_gallery.html"
//! images_dir = "images"
//! title = "Image Files Table"
//! ```
//!
//! Config files are sparse: user values are merged on top of the stock
//! defaults, so a file that only sets `[output] title` keeps every other
//! default. Unknown keys are rejected to catch typos early.

use crate::naming::DEFAULT_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

pub const DEFAULT_IGNORE_DIRS: &[&str] = &["node_modules", "dist", "build", "coverage", "out"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// What the walker looks for and where it refuses to go.
    pub scan: ScanConfig,
    /// Where the table, gallery, and copies are written.
    pub output: OutputConfig,
}

/// Walker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Recognized image extensions, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Directory base names skipped at any depth.
    pub ignore_dirs: Vec<String>,
    /// Descend through symlinks to directories.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            follow_links: true,
        }
    }
}

/// Output locations, relative to the working directory unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// CSV manifest.
    pub table: PathBuf,
    /// HTML gallery document.
    pub gallery: PathBuf,
    /// Directory receiving the flattened copies.
    pub images_dir: PathBuf,
    /// `<title>` and heading of the gallery document.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table: PathBuf::from("image_files.csv"),
            gallery: PathBuf::from("image_gallery.html"),
            images_dir: PathBuf::from("images"),
            title: "Image Files Table".to_string(),
        }
    }
}

impl Config {
    /// Reject values that would make the run meaningless or destructive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        for ext in &self.scan.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(ConfigError::Validation(format!(
                    "scan.extensions entry {ext:?} must look like \".png\""
                )));
            }
        }
        for dir in &self.scan.ignore_dirs {
            if dir.is_empty() || dir.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "scan.ignore_dirs entry {dir:?} must be a bare directory name"
                )));
            }
        }
        for (key, path) in [
            ("output.table", &self.output.table),
            ("output.gallery", &self.output.gallery),
            ("output.images_dir", &self.output.images_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.output.table == self.output.gallery {
            return Err(ConfigError::Validation(
                "output.table and output.gallery must be different files".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so an
///   `extensions` array replaces the default list rather than extending it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration.
///
/// With no path, returns the validated defaults. A path that was named
/// explicitly but does not exist is an error rather than a silent fallback.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let overlay = match path {
        None => None,
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p.to_path_buf()));
            }
            let content = fs::read_to_string(p)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock config file.
///
/// Printed by `find-images --print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# find-images configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Directory walk
# ---------------------------------------------------------------------------
[scan]
# Extensions that mark a file as an image. Matched case-insensitively against
# the last extension of the filename. Add ".ico" or ".gif" to include them.
extensions = [".png", ".jpg", ".jpeg", ".svg", ".webp"]

# Directory names that are never descended into, at any depth.
ignore_dirs = ["node_modules", "dist", "build", "coverage", "out"]

# Follow symlinks to directories. Loops are reported as errors.
follow_links = true

# ---------------------------------------------------------------------------
# Outputs (relative to the working directory)
# ---------------------------------------------------------------------------
[output]
# CSV manifest: filename, relative_path, full_path
table = "image_files.csv"

# HTML gallery with one preview per image
gallery = "image_gallery.html"

# Flat directory receiving one copy per image
images_dir = "images"

# Gallery page title and heading
title = "Image Files Table"
"##
}
