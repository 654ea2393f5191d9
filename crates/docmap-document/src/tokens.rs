//! Token counting strategies.
//!
//! Section sizes are reported in tokens. Two strategies exist and they never agree exactly:
//! - [`WordEstimate`]: `floor(words * 0.75)` over whitespace-delimited words, always available
//!   and fully deterministic
//! - `Cl100k`: the `cl100k_base` BPE used by GPT-4 class models, compiled in with the
//!   `tiktoken` feature
//!
//! The strategy is chosen once per run with [`select_counter`] and then passed by reference to
//! everything that reports counts.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DocumentError;

/// Counts tokens in a span of text.
pub trait TokenCounter {
    /// Returns the number of tokens in `text`.
    fn count(&self, text: &str) -> usize;

    /// Short name of the strategy, reported alongside counts.
    fn name(&self) -> &'static str;
}

/// Word-count based estimate: three tokens for every four words, rounded down.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordEstimate;

impl TokenCounter for WordEstimate {
    fn count(&self, text: &str) -> usize {
        let words = text.split_whitespace().count();
        words * 3 / 4
    }

    fn name(&self) -> &'static str {
        "words"
    }
}

/// Precise counter backed by the `cl100k_base` encoding.
#[cfg(feature = "tiktoken")]
pub struct Cl100k {
    /// Loaded BPE tables.
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl Cl100k {
    /// Loads the encoding tables.
    pub fn new() -> Result<Self, DocumentError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| DocumentError::TokenizerInit {
            name: TokenizerKind::Cl100k.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { bpe })
    }
}

#[cfg(feature = "tiktoken")]
impl TokenCounter for Cl100k {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn name(&self) -> &'static str {
        "cl100k"
    }
}

/// Which token counter to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// The precise counter when compiled in, otherwise the word estimate.
    #[default]
    Auto,
    /// Always the word estimate.
    Words,
    /// Always the precise counter; an error if it is unavailable.
    #[serde(alias = "cl100k_base")]
    Cl100k,
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Words => write!(f, "words"),
            Self::Cl100k => write!(f, "cl100k"),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "words" => Ok(Self::Words),
            "cl100k" | "cl100k_base" => Ok(Self::Cl100k),
            other => Err(format!(
                "unknown token counter '{other}' (expected auto, words or cl100k)"
            )),
        }
    }
}

/// Returns true if the precise tokenizer is compiled into this build.
pub fn precise_counter_available() -> bool {
    cfg!(feature = "tiktoken")
}

/// Builds the token counter for the requested strategy.
pub fn select_counter(kind: TokenizerKind) -> Result<Box<dyn TokenCounter>, DocumentError> {
    let counter: Box<dyn TokenCounter> = match kind {
        TokenizerKind::Words => Box::new(WordEstimate),
        TokenizerKind::Cl100k => precise_counter()?,
        TokenizerKind::Auto => precise_counter().unwrap_or_else(|e| {
            debug!("precise token counter unavailable, using word estimate: {e}");
            Box::new(WordEstimate)
        }),
    };
    debug!(counter = counter.name(), "selected token counter");
    Ok(counter)
}

/// Loads the precise counter.
#[cfg(feature = "tiktoken")]
fn precise_counter() -> Result<Box<dyn TokenCounter>, DocumentError> {
    Ok(Box::new(Cl100k::new()?))
}

/// Reports that the precise counter is missing from this build.
#[cfg(not(feature = "tiktoken"))]
fn precise_counter() -> Result<Box<dyn TokenCounter>, DocumentError> {
    Err(DocumentError::TokenizerUnavailable {
        name: TokenizerKind::Cl100k.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_estimate_rounds_down() {
        assert_eq!(WordEstimate.count(""), 0);
        assert_eq!(WordEstimate.count("one"), 0);
        assert_eq!(WordEstimate.count("one two"), 1);
        assert_eq!(WordEstimate.count("one two three four"), 3);
        assert_eq!(WordEstimate.count("a b c d e f g"), 5);
    }

    #[test]
    fn word_estimate_splits_on_any_whitespace() {
        assert_eq!(WordEstimate.count("  alpha\tbeta\n\ngamma   delta  "), 3);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("AUTO".parse::<TokenizerKind>(), Ok(TokenizerKind::Auto));
        assert_eq!("words".parse::<TokenizerKind>(), Ok(TokenizerKind::Words));
        assert_eq!(
            "cl100k_base".parse::<TokenizerKind>(),
            Ok(TokenizerKind::Cl100k)
        );
        assert!("bpe".parse::<TokenizerKind>().is_err());
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in [
            TokenizerKind::Auto,
            TokenizerKind::Words,
            TokenizerKind::Cl100k,
        ] {
            assert_eq!(kind.to_string().parse::<TokenizerKind>(), Ok(kind));
        }
    }

    #[test]
    fn words_selection_is_always_the_estimate() {
        let counter = select_counter(TokenizerKind::Words).unwrap();
        assert_eq!(counter.name(), "words");
        assert_eq!(counter.count("one two three four"), 3);
    }

    #[test]
    fn auto_selection_never_fails() {
        let counter = select_counter(TokenizerKind::Auto).unwrap();
        if precise_counter_available() {
            assert_eq!(counter.name(), "cl100k");
        } else {
            assert_eq!(counter.name(), "words");
        }
    }

    #[cfg(not(feature = "tiktoken"))]
    #[test]
    fn precise_selection_errors_without_feature() {
        let err = select_counter(TokenizerKind::Cl100k).err().unwrap();
        assert!(matches!(err, DocumentError::TokenizerUnavailable { .. }));
    }
}
