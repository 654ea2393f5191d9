//! Configuration file parsing.
//!
//! Parses individual `.docmap.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use docmap_document::TokenizerKind;
use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Token counting section.
    pub tokens: Option<RawTokenSettings>,
    /// Size band section.
    pub band: Option<RawBandSettings>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
}

/// Raw `[tokens]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTokenSettings {
    /// Counter strategy.
    pub counter: Option<TokenizerKind>,
}

/// Raw `[band]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBandSettings {
    /// Sections with fewer tokens are flagged.
    pub lower: Option<usize>,
    /// Sections with more tokens are flagged.
    pub upper: Option<usize>,
}

/// Raw `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Embed section bodies in the structure output.
    pub include_content: Option<bool>,
    /// Maximum out-of-band sections printed to the terminal.
    pub report_limit: Option<usize>,
    /// Default structure output filename.
    pub structure_file: Option<String>,
    /// Default section map filename.
    pub map_file: Option<String>,
    /// Default metadata output filename.
    pub metadata_file: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
