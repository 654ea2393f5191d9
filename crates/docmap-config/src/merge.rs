//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`. Every field is resolved
//! independently: the file closest to the working directory that sets it wins, and unset
//! fields fall back to the defaults.

use std::path::{Path, PathBuf};

use crate::{
    BandSettings, Config, OutputSettings, TokenSettings,
    parse::{RawBandSettings, RawConfig, RawOutputSettings, RawTokenSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(tokens) = &raw.tokens {
            apply_tokens(&mut config.tokens, tokens);
        }
        if let Some(band) = &raw.band {
            apply_band(&mut config.band, band);
        }
        if let Some(output) = &raw.output {
            apply_output(&mut config.output, output);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);
    config
}

/// Applies a raw `[tokens]` section.
fn apply_tokens(result: &mut TokenSettings, raw: &RawTokenSettings) {
    if let Some(v) = raw.counter {
        result.counter = v;
    }
}

/// Applies a raw `[band]` section.
fn apply_band(result: &mut BandSettings, raw: &RawBandSettings) {
    if let Some(v) = raw.lower {
        result.lower = v;
    }
    if let Some(v) = raw.upper {
        result.upper = v;
    }
}

/// Applies a raw `[output]` section.
fn apply_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.include_content {
        result.include_content = v;
    }
    if let Some(v) = raw.report_limit {
        result.report_limit = v;
    }
    if let Some(v) = &raw.structure_file {
        result.structure_file.clone_from(v);
    }
    if let Some(v) = &raw.map_file {
        result.map_file.clone_from(v);
    }
    if let Some(v) = &raw.metadata_file {
        result.metadata_file.clone_from(v);
    }
}
