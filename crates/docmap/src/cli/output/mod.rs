//! Rendering and serialization for CLI output files and terminal reports.

use std::{fs, path::Path, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use docmap_document::{OutOfBand, SectionRecord, SectionTree, Statistics, TokenBand, TokenCounts};
use docmap_extract::{Metadata, MetadataStatistics, OrderedCounts};
use docmap_highlight::Styler;
use serde::Serialize;

/// Structure output file.
#[derive(Serialize)]
pub struct StructureReport<'a> {
    /// The document path as given on the command line.
    pub source_file: String,
    /// Name of the token counter used.
    pub token_counter: &'a str,
    /// Root section records with nested children.
    pub sections: Vec<SectionRecord>,
    /// Aggregate token statistics.
    pub statistics: &'a Statistics,
}

/// Metadata output file.
#[derive(Serialize)]
pub struct MetadataReport<'a> {
    /// The document path as given on the command line.
    pub source_file: String,
    /// Extracted records.
    #[serde(flatten)]
    pub metadata: &'a Metadata,
    /// Summary counts.
    pub statistics: &'a MetadataStatistics,
}

/// Serializes `value` as pretty JSON into `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExitCode> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("error: failed to serialize JSON: {e}");
        ExitCode::FAILURE
    })?;
    write_text(path, &json)
}

/// Writes `text` to `path`, creating missing parent directories.
pub fn write_text(path: &Path, text: &str) -> Result<(), ExitCode> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(parent)
    {
        eprintln!("error: failed to create {}: {e}", parent.display());
        return Err(ExitCode::FAILURE);
    }
    fs::write(path, text).map_err(|e| {
        eprintln!("error: failed to write {}: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Renders the human-readable section outline.
pub fn render_section_map(source: &str, tree: &SectionTree, counts: &TokenCounts) -> String {
    let mut out = format!("# Document Structure\n\nSource: {source}\n\n");
    for id in tree.iter_preorder() {
        let indent = "  ".repeat(tree.depth(id));
        out.push_str(&format!(
            "{indent}- {} ({} tokens)\n",
            tree.get(id).title,
            counts.get(id)
        ));
    }
    out
}

/// Prints the headline statistics for a parsed document.
pub fn print_statistics(styler: &Styler, stats: &Statistics) {
    println!(
        "Found {} sections",
        styler.subheader(&stats.total_sections.to_string())
    );
    println!("Total tokens: {}", stats.total_tokens);
    println!(
        "Average tokens per section: {:.1}",
        stats.avg_tokens_per_section
    );
    println!("Token range: {} - {}", stats.min_tokens, stats.max_tokens);
}

/// Prints sections outside the band, at most `limit` of them.
pub fn print_out_of_band(styler: &Styler, flagged: &[OutOfBand], band: TokenBand, limit: usize) {
    println!();
    let range = format!("{}-{}", band.lower, band.upper);
    if flagged.is_empty() {
        println!(
            "{}",
            styler.success(&format!("All sections within {range} token target range ✓"))
        );
        return;
    }

    println!(
        "{}",
        styler.warning(&format!("Sections outside {range} token target range:"))
    );
    for entry in flagged.iter().take(limit) {
        println!(
            "  - {}: {} tokens {}",
            entry.title,
            entry.token_count,
            styler.dim(&format!("({})", entry.breadcrumb))
        );
    }
    if flagged.len() > limit {
        println!("  ... and {} more", flagged.len() - limit);
    }
}

/// Prints per-category metadata counts.
pub fn print_metadata_summary(styler: &Styler, stats: &MetadataStatistics) {
    let rows = [
        (stats.total_tables, "tables"),
        (stats.total_code_blocks, "code blocks"),
        (stats.total_benchmarks, "benchmarks"),
        (stats.total_techniques, "techniques"),
        (stats.total_models, "models"),
        (stats.total_acronyms, "acronyms"),
    ];
    for (count, label) in rows {
        println!("Found {} {label}", styler.subheader(&count.to_string()));
    }

    if let Some(languages) = &stats.code_languages {
        let names: Vec<&str> = languages.entries().iter().map(|(n, _)| n.as_str()).collect();
        println!();
        println!("Code languages: {}", names.join(", "));
    }

    if let Some(sections) = &stats.sections_with_tables {
        println!();
        println!("{}", styler.header("Sections with tables:"));
        println!("{}", counts_table("Section", "Tables", sections));
    }
}

/// Builds a two-column table from ordered counts.
fn counts_table(key_header: &str, count_header: &str, counts: &OrderedCounts) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![key_header, count_header]);
    for (name, count) in counts.entries() {
        table.add_row(vec![Cell::new(name), Cell::new(count.to_string())]);
    }
    table
}
