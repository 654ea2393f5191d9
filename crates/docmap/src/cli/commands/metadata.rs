//! Implementation of `docmap metadata`.

use std::{path::PathBuf, process::ExitCode};

use docmap_document::read_source;
use docmap_extract::extract_metadata;

use crate::cli::{
    args::MetadataCommand,
    context::CommandContext,
    output::{MetadataReport, print_metadata_summary, write_json},
};

/// Extracts metadata from a document and writes it as JSON.
pub fn run(ctx: &CommandContext, cmd: &MetadataCommand) -> ExitCode {
    let source = cmd.file.display().to_string();

    let content = match read_source(&cmd.file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Extracting metadata from {source}...");
    let metadata = extract_metadata(&content);
    let statistics = metadata.statistics();

    print_metadata_summary(&ctx.styler, &statistics);

    let report = MetadataReport {
        source_file: source,
        metadata: &metadata,
        statistics: &statistics,
    };
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.config.output.metadata_file));
    if let Err(code) = write_json(&output, &report) {
        return code;
    }

    println!();
    println!("Wrote metadata to {}", output.display());
    ExitCode::SUCCESS
}
