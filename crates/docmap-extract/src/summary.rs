//! Summary statistics over extracted metadata.

use serde::{Serialize, Serializer};

use crate::{code::CodeBlock, table::Table, terms::KeyTerms};

/// How many sections `sections_with_tables` reports.
const TOP_TABLE_SECTIONS: usize = 5;

/// Counts keyed by name, kept in first-seen order.
///
/// Serializes as a JSON object whose keys appear in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCounts(Vec<(String, usize)>);

impl OrderedCounts {
    /// Counts occurrences of each key, keeping the order keys were first seen.
    pub fn tally<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        for key in keys {
            match entries.iter_mut().find(|(name, _)| name == key) {
                Some((_, count)) => *count += 1,
                None => entries.push((key.to_string(), 1)),
            }
        }
        Self(entries)
    }

    /// Entries in order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.0
    }

    /// Count for `key`, if present.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, count)| *count)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keeps the `limit` largest counts. The sort is stable, so ties keep first-seen order.
    fn top(mut self, limit: usize) -> Self {
        self.0.sort_by(|a, b| b.1.cmp(&a.1));
        self.0.truncate(limit);
        self
    }
}

impl Serialize for OrderedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, count)| (name, count)))
    }
}

/// Aggregate counts describing a metadata extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataStatistics {
    /// Number of tables.
    pub total_tables: usize,
    /// Number of code blocks.
    pub total_code_blocks: usize,
    /// Number of benchmark mentions.
    pub total_benchmarks: usize,
    /// Number of distinct techniques.
    pub total_techniques: usize,
    /// Number of distinct models.
    pub total_models: usize,
    /// Number of distinct acronyms.
    pub total_acronyms: usize,
    /// Code blocks per language. Absent when there are no code blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_languages: Option<OrderedCounts>,
    /// Sections holding the most tables. Absent when there are no tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_with_tables: Option<OrderedCounts>,
}

impl MetadataStatistics {
    /// Summarizes extracted records.
    pub fn summarize(
        tables: &[Table],
        code_blocks: &[CodeBlock],
        benchmark_count: usize,
        key_terms: &KeyTerms,
    ) -> Self {
        let code_languages = (!code_blocks.is_empty())
            .then(|| OrderedCounts::tally(code_blocks.iter().map(|b| b.language.as_str())));
        let sections_with_tables = (!tables.is_empty()).then(|| {
            OrderedCounts::tally(tables.iter().map(|t| t.section.as_str())).top(TOP_TABLE_SECTIONS)
        });

        Self {
            total_tables: tables.len(),
            total_code_blocks: code_blocks.len(),
            total_benchmarks: benchmark_count,
            total_techniques: key_terms.techniques.len(),
            total_models: key_terms.models.len(),
            total_acronyms: key_terms.acronyms.len(),
            code_languages,
            sections_with_tables,
        }
    }
}
