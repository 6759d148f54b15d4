//! Configuration module.
//!
//! Handles loading, validating, and merging `site-upkeep.toml`. Stock defaults
//! reproduce the constants the maintenance jobs have always used, so running
//! without a config file behaves exactly like the bare jobs.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [compress]
//! root = "public/images"     # Directory whose subdirectories hold thumbnails
//! source_name = "main.png"   # Thumbnail file looked up in each subdirectory
//! level = 9                  # PNG compression effort (0-9)
//!
//! [extract]
//! source_dir = "page-old"    # Directory scanned for documents (non-recursive)
//! index = "blog.json"        # JSON array that new records are appended to
//! extensions = ["mdx"]       # Document extensions to pick up
//! link_prefix = "/blog"      # Prefix of each record's `link`
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "site-upkeep.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration for both jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpkeepConfig {
    /// Thumbnail compressor settings.
    pub compress: CompressConfig,
    /// Metadata extractor settings.
    pub extract: ExtractConfig,
}

impl UpkeepConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compress.level > 9 {
            return Err(ConfigError::Validation(
                "compress.level must be 0-9".into(),
            ));
        }
        if self.compress.source_name.is_empty() {
            return Err(ConfigError::Validation(
                "compress.source_name must not be empty".into(),
            ));
        }
        if self.extract.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extract.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressConfig {
    pub root: PathBuf,
    pub source_name: String,
    /// PNG compression effort, 0 (fastest) to 9 (smallest).
    pub level: u8,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public/images"),
            source_name: "main.png".to_string(),
            level: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub source_dir: PathBuf,
    pub index: PathBuf,
    /// Extensions (without the dot) that mark a file as a document.
    pub extensions: Vec<String>,
    pub link_prefix: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("page-old"),
            index: PathBuf::from("blog.json"),
            extensions: vec!["mdx".to_string()],
            link_prefix: "/blog".to_string(),
        }
    }
}

impl ExtractConfig {
    /// Whether `path` carries one of the configured document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(UpkeepConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<UpkeepConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: UpkeepConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is missing.
pub fn load_config(path: &Path) -> Result<UpkeepConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("no config at {}, using stock defaults", path.display());
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `site-upkeep.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# site-upkeep configuration
# =========================
# Every key is optional. Values shown are the built-in defaults.

[compress]
# Directory whose immediate subdirectories each hold one thumbnail.
# A missing directory is not an error; there is simply nothing to do.
root = "public/images"
# Thumbnail looked up in each subdirectory. The compressed copy is written
# next to it with "-min" before the extension (main.png -> main-min.png).
source_name = "main.png"
# PNG compression effort: 0-3 fast, 4-6 balanced, 7-9 smallest output.
level = 9

[extract]
# Directory scanned (non-recursively) for documents with front matter.
source_dir = "page-old"
# Existing JSON array that new records are appended to. Must already exist.
index = "blog.json"
# File extensions, without the dot, that count as documents.
extensions = ["mdx"]
# Each record's link is "<link_prefix>/<file name without extension>".
link_prefix = "/blog"
"##
}
