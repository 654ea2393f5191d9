//! Metadata extraction for docmap.
//!
//! Four independent line scanners pull structured records out of a markdown document:
//! - Pipe tables with headers and rows
//! - Fenced code blocks with their language tag
//! - Benchmark-like numeric mentions
//! - Domain key terms (techniques, models, acronyms)
//!
//! Every record that lives inside a section is attributed to the title of the most recent
//! header, or `Document` before the first one.

#![warn(missing_docs)]

mod benchmark;
mod code;
mod summary;
mod table;
mod terms;

pub use benchmark::{Benchmark, extract_benchmarks};
pub use code::{CodeBlock, extract_code_blocks};
pub use summary::{MetadataStatistics, OrderedCounts};
pub use table::{Table, extract_tables};
pub use terms::{ACRONYM_STOPLIST, KeyTerms, TERM_PATTERNS, TermCategory, extract_key_terms};

use serde::Serialize;
use tracing::debug;

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Tables in discovery order.
    pub tables: Vec<Table>,
    /// Code blocks in discovery order.
    pub code_blocks: Vec<CodeBlock>,
    /// Benchmark mentions in line order.
    pub benchmarks: Vec<Benchmark>,
    /// Key terms found anywhere in the document.
    pub key_terms: KeyTerms,
}

impl Metadata {
    /// Summary counts for this extraction.
    pub fn statistics(&self) -> MetadataStatistics {
        MetadataStatistics::summarize(
            &self.tables,
            &self.code_blocks,
            self.benchmarks.len(),
            &self.key_terms,
        )
    }
}

/// Runs every extractor over `content`.
pub fn extract_metadata(content: &str) -> Metadata {
    let metadata = Metadata {
        tables: extract_tables(content),
        code_blocks: extract_code_blocks(content),
        benchmarks: extract_benchmarks(content),
        key_terms: extract_key_terms(content),
    };
    debug!(
        tables = metadata.tables.len(),
        code_blocks = metadata.code_blocks.len(),
        benchmarks = metadata.benchmarks.len(),
        "extracted metadata"
    );
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_metadata() {
        let content = "\
# Results
| Model | Acc |
|---|---|
| BERT | 91% |

```python
print(1)
```
";
        let metadata = extract_metadata(content);

        assert_eq!(metadata.tables.len(), 1);
        assert_eq!(metadata.code_blocks.len(), 1);
        assert_eq!(metadata.benchmarks.len(), 1);
        assert_eq!(metadata.key_terms.models, vec!["BERT"]);

        let stats = metadata.statistics();
        assert_eq!(stats.total_tables, 1);
        assert_eq!(stats.total_code_blocks, 1);
        assert_eq!(stats.total_models, 1);
        assert_eq!(stats.sections_with_tables.unwrap().get("Results"), Some(1));
        assert_eq!(stats.code_languages.unwrap().get("python"), Some(1));
    }

    #[test]
    fn test_empty_document() {
        let metadata = extract_metadata("");
        assert_eq!(metadata, Metadata::default());
        assert_eq!(metadata.statistics().total_benchmarks, 0);
    }
}
