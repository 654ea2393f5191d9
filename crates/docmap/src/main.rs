//! docmap: structural maps and metadata for markdown documents.
//!
//! `docmap structure` splits a document into a tree of sections keyed by header, counts the
//! tokens in each, and reports sections that fall outside a target size band so the document
//! can be chunked sensibly. `docmap metadata` pulls tables, code blocks, benchmark figures and
//! domain key terms out of the same document.

#![warn(missing_docs)]

mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::Cli;

/// Parses arguments, installs logging and runs the selected command.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli::commands::run(cli.command)
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
