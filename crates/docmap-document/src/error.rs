//! Error types for document loading and token counting.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading a document or preparing a token counter.
///
/// Scanning itself never fails: malformed markdown simply yields fewer sections.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The input file does not exist.
    #[error("input file not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The precise tokenizer was requested but is not compiled into this build.
    #[error("token counter '{name}' is not available in this build (enable the `tiktoken` feature)")]
    TokenizerUnavailable {
        /// Name of the requested counter.
        name: String,
    },

    /// The precise tokenizer failed to load its encoding tables.
    #[error("failed to initialize token counter '{name}': {message}")]
    TokenizerInit {
        /// Name of the requested counter.
        name: String,
        /// Description of the failure.
        message: String,
    },
}
