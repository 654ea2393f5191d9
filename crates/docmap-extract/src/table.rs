//! Pipe table extraction.
//!
//! A table starts at a line that contains `|` and begins with `|` once trimmed. It continues
//! through every immediately following line that contains `|`; the first line without one (or
//! the end of the document) ends it. Blank lines are not tolerated inside a table.
//!
//! Cells are obtained by splitting on `|` and dropping the first and last fields, which are the
//! (normally empty) text outside the outer pipes.

use std::sync::LazyLock;

use docmap_document::{SectionCursor, lines};
use regex::Regex;
use serde::Serialize;

/// Matches a header/body separator row such as `|---|:--:|`.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("separator pattern is valid"));

/// A table found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// `table-<n>`, numbered in discovery order from 1.
    pub id: String,
    /// Title of the enclosing section, or `Document` before the first header.
    pub section: String,
    /// Header cells, trimmed.
    pub headers: Vec<String>,
    /// Data rows, each a list of trimmed cells.
    pub rows: Vec<Vec<String>>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of header cells.
    pub column_count: usize,
}

/// Extracts every well-formed table from `content`.
///
/// Candidate tables without header cells or without a non-empty data row are skipped and do
/// not consume an id.
pub fn extract_tables(content: &str) -> Vec<Table> {
    let lines: Vec<&str> = lines(content).collect();
    let mut cursor = SectionCursor::new();
    let mut tables = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if cursor.observe(line) {
            i += 1;
            continue;
        }

        if !starts_table(line) {
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        while i < lines.len() && lines[i].contains('|') {
            i += 1;
        }

        if let Some((headers, rows)) = parse_table(&lines[start..i]) {
            tables.push(Table {
                id: format!("table-{}", tables.len() + 1),
                section: cursor.current().to_string(),
                column_count: headers.len(),
                row_count: rows.len(),
                headers,
                rows,
            });
        }
        // The line that ended the table is examined again on the next iteration.
    }

    tables
}

/// Returns true if `line` can open a table.
fn starts_table(line: &str) -> bool {
    line.contains('|') && line.trim().starts_with('|')
}

/// Parses collected table lines into header cells and data rows.
fn parse_table(block: &[&str]) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    if block.len() < 2 {
        return None;
    }

    let headers = split_cells(block[0]);
    let data_start = if is_separator(block[1]) { 2 } else { 1 };

    let rows: Vec<Vec<String>> = block[data_start..]
        .iter()
        .map(|line| split_cells(line))
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    if headers.is_empty() || rows.is_empty() {
        return None;
    }
    Some((headers, rows))
}

/// Returns true if `line` is a separator row, ignoring surrounding whitespace.
fn is_separator(line: &str) -> bool {
    SEPARATOR_RE.is_match(line.trim())
}

/// Splits a row into trimmed cells, dropping the fields outside the outer pipes.
fn split_cells(line: &str) -> Vec<String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}
