//! Benchmark-like numeric mentions.
//!
//! Each non-header line is matched against three independent pattern families, and every match
//! becomes a record, so a single line can yield several benchmarks:
//!
//! | Family | Example | Metric | Value |
//! |---|---|---|---|
//! | percentage | `95.2%` | `Percentage` | `95.2%` |
//! | labeled decimal | `F1: 0.94` | `F1` | `0.94` |
//! | integer with unit | `500ms` | `Ms` | `500` |

use std::sync::LazyLock;

use docmap_document::{SectionCursor, lines};
use regex::Regex;
use serde::Serialize;

/// Metric name recorded for percentages.
const PERCENTAGE: &str = "Percentage";

/// A number followed by a percent sign, optionally separated by whitespace.
static PERCENTAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*%").expect("percentage pattern is valid"));

/// A word label, a colon, and a single-digit decimal.
static LABELED_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+):\s*(\d\.\d+)").expect("decimal pattern is valid"));

/// An integer followed by a known unit.
static INTEGER_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(ms|tokens|seconds|iterations|examples|samples)")
        .expect("unit pattern is valid")
});

/// A numeric mention that looks like a reported result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Benchmark {
    /// What was measured: `Percentage`, a capitalized unit, or the label from the text.
    pub metric: String,
    /// The number as written.
    pub value: String,
    /// The full source line, trimmed.
    pub context: String,
    /// Title of the enclosing section, or `Document` before the first header.
    pub section: String,
}

/// Extracts benchmark mentions from every non-header line of `content`.
pub fn extract_benchmarks(content: &str) -> Vec<Benchmark> {
    let mut cursor = SectionCursor::new();
    let mut benchmarks = Vec::new();

    for line in lines(content) {
        if cursor.observe(line) {
            continue;
        }
        scan_line(line, cursor.current(), &mut benchmarks);
    }

    benchmarks
}

/// Appends every benchmark found in `line`.
fn scan_line(line: &str, section: &str, out: &mut Vec<Benchmark>) {
    let context = line.trim();
    let mut push = |metric: String, value: String| {
        out.push(Benchmark {
            metric,
            value,
            context: context.to_string(),
            section: section.to_string(),
        });
    };

    for caps in PERCENTAGE_RE.captures_iter(line) {
        push(PERCENTAGE.to_string(), format!("{}%", &caps[1]));
    }

    for caps in LABELED_DECIMAL_RE.captures_iter(line) {
        push(caps[1].to_string(), caps[2].to_string());
    }

    for caps in INTEGER_UNIT_RE.captures_iter(line) {
        push(capitalize(&caps[2]), caps[1].to_string());
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
