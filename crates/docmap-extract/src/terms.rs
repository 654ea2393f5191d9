//! Domain key term extraction.
//!
//! Techniques and model names come from a curated table of case-insensitive patterns applied to
//! the whole document; the first capture group of every match is collected as written.
//! Acronyms are bare runs of 2-6 uppercase letters, minus a stoplist of common words and
//! markdown tokens. Adding a term means adding a row to [`TERM_PATTERNS`].

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

/// Category a key term pattern feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermCategory {
    /// Methods and techniques.
    Technique,
    /// Model families and names.
    Model,
}

/// Curated `(pattern, category)` table. Patterns are matched case-insensitively.
pub const TERM_PATTERNS: &[(&str, TermCategory)] = &[
    (
        r"\b(RAG|Retrieval[\s-]Augmented[\s-]Generation)\b",
        TermCategory::Technique,
    ),
    (r"\b(Fine[\s-]tuning|Finetuning)\b", TermCategory::Technique),
    (
        r"\b(Few[\s-]shot|Zero[\s-]shot|One[\s-]shot)\s+learning\b",
        TermCategory::Technique,
    ),
    (r"\b(Transfer\s+learning)\b", TermCategory::Technique),
    (r"\b(Reinforcement\s+learning|RLHF)\b", TermCategory::Technique),
    (
        r"\b(Supervised|Unsupervised|Self[\s-]supervised)\s+learning\b",
        TermCategory::Technique,
    ),
    (r"\b(Prompt\s+engineering)\b", TermCategory::Technique),
    (r"\b(Chain[\s-]of[\s-]thought|CoT)\b", TermCategory::Technique),
    (r"\b(Embedding|Embeddings)\b", TermCategory::Technique),
    (r"\b(Attention\s+mechanism)\b", TermCategory::Technique),
    (r"\b(Transformer)\b", TermCategory::Technique),
    (r"\b(GPT[\s-]?[0-9]+(?:\.[0-9]+)?)\b", TermCategory::Model),
    (r"\b(Claude(?:[\s-][0-9]+)?)\b", TermCategory::Model),
    (r"\b(BERT|RoBERTa|ALBERT)\b", TermCategory::Model),
    (r"\b(T5|BART)\b", TermCategory::Model),
    (r"\b(Llama[\s-]?[0-9]*)\b", TermCategory::Model),
    (r"\b(PaLM[\s-]?[0-9]*)\b", TermCategory::Model),
    (r"\b(Mistral[\s-]?[0-9]*)\b", TermCategory::Model),
    (r"\b(Gemini)\b", TermCategory::Model),
];

/// Uppercase tokens that are never reported as acronyms.
pub const ACRONYM_STOPLIST: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "HER", "WAS", "ONE", "OUR",
    "OUT", "DAY", "GET", "HAS", "HIM", "HIS", "HOW", "ITS", "MAY", "NEW", "NOW", "OLD", "SEE",
    "TWO", "WHO", "BOY", "DID", "LET", "PUT", "SAY", "SHE", "TOO", "USE", "MD", "H1", "H2", "H3",
    "H4", "H5", "H6",
];

/// Compiled form of [`TERM_PATTERNS`].
static COMPILED_PATTERNS: LazyLock<Vec<(Regex, TermCategory)>> = LazyLock::new(|| {
    TERM_PATTERNS
        .iter()
        .map(|&(pattern, category)| {
            let regex = Regex::new(&format!("(?i){pattern}")).expect("term pattern is valid");
            (regex, category)
        })
        .collect()
});

/// Bare acronym candidates.
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,6})\b").expect("acronym pattern is valid"));

/// Distinct key terms, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyTerms {
    /// Technique names as written in the document.
    pub techniques: Vec<String>,
    /// Model names as written in the document.
    pub models: Vec<String>,
    /// Uppercase acronyms not in the stoplist.
    pub acronyms: Vec<String>,
}

impl KeyTerms {
    /// Returns true if no terms of any category were found.
    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty() && self.models.is_empty() && self.acronyms.is_empty()
    }
}

/// Extracts techniques, models and acronyms from the whole of `content`.
pub fn extract_key_terms(content: &str) -> KeyTerms {
    let mut techniques = BTreeSet::new();
    let mut models = BTreeSet::new();

    for (regex, category) in COMPILED_PATTERNS.iter() {
        let bucket = match category {
            TermCategory::Technique => &mut techniques,
            TermCategory::Model => &mut models,
        };
        for caps in regex.captures_iter(content) {
            bucket.insert(caps[1].to_string());
        }
    }

    let acronyms: BTreeSet<String> = ACRONYM_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|candidate| !ACRONYM_STOPLIST.contains(&candidate.as_str()))
        .collect();

    KeyTerms {
        techniques: techniques.into_iter().collect(),
        models: models.into_iter().collect(),
        acronyms: acronyms.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_techniques_and_models() {
        let terms = extract_key_terms("We used RAG and GPT-4 with BERT");

        assert!(terms.techniques.contains(&"RAG".to_string()));
        assert!(terms.models.contains(&"GPT-4".to_string()));
        assert!(terms.models.contains(&"BERT".to_string()));
    }

    #[test]
    fn test_case_is_preserved_as_matched() {
        let terms = extract_key_terms("fine-tuning helps; Fine tuning too. Uses llama 2.");

        assert_eq!(terms.techniques, vec!["Fine tuning", "fine-tuning"]);
        assert_eq!(terms.models, vec!["llama 2"]);
    }

    #[test]
    fn test_learning_patterns_capture_qualifier_only() {
        let terms = extract_key_terms("Zero-shot learning beats supervised learning here.");
        assert_eq!(terms.techniques, vec!["Zero-shot", "supervised"]);
    }

    #[test]
    fn test_model_versions() {
        let terms =
            extract_key_terms("Compared GPT3.5, GPT 4, Claude-3, PaLM2, Mistral 7 and Gemini.");
        assert_eq!(
            terms.models,
            vec!["Claude-3", "GPT 4", "GPT3.5", "Gemini", "Mistral 7", "PaLM2"]
        );
    }

    #[test]
    fn test_acronyms_filter_stoplist() {
        let terms = extract_key_terms("THE API AND SDK FOR NLP; see MD and H1 in the README");
        assert_eq!(terms.acronyms, vec!["API", "NLP", "README", "SDK"]);
    }

    #[test]
    fn test_acronym_length_bounds() {
        let terms = extract_key_terms("A AB ABCDEF ABCDEFG");
        assert_eq!(terms.acronyms, vec!["AB", "ABCDEF"]);
    }

    #[test]
    fn test_acronyms_are_case_sensitive() {
        let terms = extract_key_terms("Api api HTTPS");
        assert_eq!(terms.acronyms, vec!["HTTPS"]);
    }

    #[test]
    fn test_results_are_sorted_and_distinct() {
        let terms = extract_key_terms("RLHF then CoT then RLHF again with Transformer");
        assert_eq!(terms.techniques, vec!["CoT", "RLHF", "Transformer"]);
        assert_eq!(terms.acronyms, vec!["RLHF"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_key_terms("").is_empty());
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(COMPILED_PATTERNS.len(), TERM_PATTERNS.len());
    }
}
