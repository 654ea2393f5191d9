//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that are legal TOML but
//! will not behave the way the user probably expects.

use std::fmt;

use docmap_document::{TokenizerKind, precise_counter_available};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The band's lower bound exceeds its upper bound, so every section is flagged.
    BandInverted {
        /// Configured lower bound.
        lower: usize,
        /// Configured upper bound.
        upper: usize,
    },
    /// The terminal report is disabled.
    ReportLimitZero,
    /// The precise counter was requested but this build does not include it.
    PreciseCounterUnavailable,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BandInverted { lower, upper } => write!(
                f,
                "band lower bound {lower} is greater than upper bound {upper}; every section will be flagged"
            ),
            Self::ReportLimitZero => {
                write!(f, "report_limit is 0; out-of-band sections will not be listed")
            }
            Self::PreciseCounterUnavailable => write!(
                f,
                "counter \"cl100k\" requested but this build lacks the tiktoken feature"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.band.lower > config.band.upper {
        warnings.push(ConfigWarning::BandInverted {
            lower: config.band.lower,
            upper: config.band.upper,
        });
    }

    if config.output.report_limit == 0 {
        warnings.push(ConfigWarning::ReportLimitZero);
    }

    if config.tokens.counter == TokenizerKind::Cl100k && !precise_counter_available() {
        warnings.push(ConfigWarning::PreciseCounterUnavailable);
    }

    warnings
}
