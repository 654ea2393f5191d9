//! Implementation of `docmap structure`.

use std::{path::PathBuf, process::ExitCode};

use docmap_document::{TokenBand, parse_structure, read_source, select_counter};
use tracing::{info, warn};

use crate::cli::{
    args::StructureCommand,
    context::CommandContext,
    output::{
        StructureReport, print_out_of_band, print_statistics, render_section_map, write_json,
        write_text,
    },
};

/// Parses a document, writes its structure JSON and section map, and reports sizing.
pub fn run(ctx: &CommandContext, cmd: &StructureCommand) -> ExitCode {
    match run_inner(ctx, cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

/// Body of [`run`], with early exits as `Err`.
fn run_inner(ctx: &CommandContext, cmd: &StructureCommand) -> Result<(), ExitCode> {
    let config = &ctx.config;
    let source = cmd.file.display().to_string();

    let content = read_source(&cmd.file).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;

    let counter = select_counter(config.tokens.counter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;
    info!(counter = counter.name(), "counting tokens");

    println!("Parsing {source}...");
    let doc = parse_structure(&content, counter.as_ref());

    if doc.is_empty() {
        eprintln!("warning: no sections found in document");
        return Ok(());
    }

    print_statistics(&ctx.styler, &doc.statistics);

    let include_content = cmd.include_content || config.output.include_content;
    let report = StructureReport {
        source_file: source.clone(),
        token_counter: doc.counts.counter(),
        sections: doc.records(include_content),
        statistics: &doc.statistics,
    };
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.structure_file));
    write_json(&output, &report)?;
    println!("Wrote structure to {}", output.display());

    let map = cmd
        .map
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.map_file));
    write_text(&map, &render_section_map(&source, &doc.tree, &doc.counts))?;
    println!("Wrote section map to {}", map.display());

    let band = TokenBand::new(
        cmd.lower.unwrap_or(config.band.lower),
        cmd.upper.unwrap_or(config.band.upper),
    );
    if (cmd.lower.is_some() || cmd.upper.is_some()) && band.lower > band.upper {
        warn!(
            lower = band.lower,
            upper = band.upper,
            "lower bound exceeds upper bound; every section is out of band"
        );
    }
    print_out_of_band(
        &ctx.styler,
        &doc.out_of_band(band),
        band,
        config.output.report_limit,
    );

    Ok(())
}
