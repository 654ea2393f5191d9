//! Configuration system for docmap.
//!
//! docmap uses TOML configuration files named `.docmap.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.docmap.toml` files found, then loading `~/.docmap.toml` as the global config with lowest
//! precedence. Command-line flags are applied on top by the caller.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, format_path_for_display, global_config_path,
    is_global_config,
};
use docmap_document::{TokenBand, TokenizerKind};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBandSettings, RawConfig, RawOutputSettings, RawTokenSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for docmap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Token counting settings.
    pub tokens: TokenSettings,
    /// Section size band settings.
    pub band: BandSettings,
    /// Output settings.
    pub output: OutputSettings,
    /// Directory containing the most specific config file, if any was found.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.docmap.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML, in the same layout as a `.docmap.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            tokens: &self.tokens,
            band: &self.band,
            output: &self.output,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Settings for `[tokens]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenSettings {
    /// Counter strategy.
    pub counter: TokenizerKind,
}

/// Settings for `[band]`: the target section size range, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BandSettings {
    /// Sections with fewer tokens are flagged.
    pub lower: usize,
    /// Sections with more tokens are flagged.
    pub upper: usize,
}

impl BandSettings {
    /// Returns the band as used by the structure report.
    pub fn to_band(&self) -> TokenBand {
        TokenBand::new(self.lower, self.upper)
    }
}

impl Default for BandSettings {
    fn default() -> Self {
        let band = TokenBand::default();
        Self {
            lower: band.lower,
            upper: band.upper,
        }
    }
}

/// Settings for `[output]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Embed section bodies in the structure output.
    pub include_content: bool,
    /// Maximum out-of-band sections printed to the terminal.
    pub report_limit: usize,
    /// Default structure output filename, relative to the working directory.
    pub structure_file: String,
    /// Default section map filename, relative to the working directory.
    pub map_file: String,
    /// Default metadata output filename, relative to the working directory.
    pub metadata_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            include_content: false,
            report_limit: 10,
            structure_file: String::from("structure.json"),
            map_file: String::from("section_map.md"),
            metadata_file: String::from("metadata.json"),
        }
    }
}

/// Borrowed view of the settings for TOML serialization.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// `[tokens]`
    tokens: &'a TokenSettings,
    /// `[band]`
    band: &'a BandSettings,
    /// `[output]`
    output: &'a OutputSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tokens.counter, TokenizerKind::Auto);
        assert_eq!(config.band.lower, 400);
        assert_eq!(config.band.upper, 900);
        assert!(!config.output.include_content);
        assert_eq!(config.output.report_limit, 10);
        assert_eq!(config.output.structure_file, "structure.json");
        assert_eq!(config.output.map_file, "section_map.md");
        assert_eq!(config.output.metadata_file, "metadata.json");
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_to_band() {
        let band = BandSettings {
            lower: 10,
            upper: 20,
        }
        .to_band();
        assert!(band.contains(10));
        assert!(band.contains(20));
        assert!(!band.contains(21));
    }

    #[test]
    fn test_load_from_no_files() {
        assert_eq!(Config::load_from_files(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_settings_to_toml() {
        let toml = Config::default().settings_to_toml().unwrap();

        assert!(toml.contains("[tokens]"));
        assert!(toml.contains("[band]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("counter = \"auto\""));
        assert!(toml.contains("lower = 400"));
        assert!(toml.contains("map_file = \"section_map.md\""));
    }

    #[test]
    fn test_settings_to_toml_round_trips_through_parser() {
        let mut config = Config::default();
        config.band.upper = 1234;
        config.tokens.counter = TokenizerKind::Words;

        let rendered = config.settings_to_toml().unwrap();
        let raw = parse_config_str(&rendered, Path::new("effective.toml")).unwrap();
        let reparsed = merge_configs(&[ParsedConfig {
            path: PathBuf::from("/x/.docmap.toml"),
            config: raw,
        }]);

        assert_eq!(reparsed.band, config.band);
        assert_eq!(reparsed.tokens, config.tokens);
        assert_eq!(reparsed.output, config.output);
    }
}
