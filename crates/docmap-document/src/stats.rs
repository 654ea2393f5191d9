//! Token statistics and size-band reporting.
//!
//! Statistics are computed over the flat multiset of every section's own token count. A
//! section's count never includes its children, so totals are not double counted.

use serde::{Deserialize, Serialize};

use crate::tree::{SectionTree, TokenCounts};

/// Aggregate token statistics for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of sections in all trees.
    pub total_sections: usize,
    /// Sum of every section's own token count.
    pub total_tokens: usize,
    /// `total_tokens / total_sections`, or 0 when there are no sections.
    pub avg_tokens_per_section: f64,
    /// Smallest section token count (0 when there are no sections).
    pub min_tokens: usize,
    /// Largest section token count (0 when there are no sections).
    pub max_tokens: usize,
}

impl Statistics {
    /// Computes statistics from measured token counts.
    pub fn from_counts(counts: &TokenCounts) -> Self {
        let total_sections = counts.iter().count();
        let total_tokens: usize = counts.iter().sum();
        let avg_tokens_per_section = if total_sections > 0 {
            total_tokens as f64 / total_sections as f64
        } else {
            0.0
        };

        Self {
            total_sections,
            total_tokens,
            avg_tokens_per_section,
            min_tokens: counts.iter().min().unwrap_or(0),
            max_tokens: counts.iter().max().unwrap_or(0),
        }
    }
}

/// Target token range for downstream chunking.
///
/// A section is out of band when its count is below `lower` or above `upper`; both bounds are
/// themselves in band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBand {
    /// Smallest in-band token count.
    pub lower: usize,
    /// Largest in-band token count.
    pub upper: usize,
}

impl Default for TokenBand {
    fn default() -> Self {
        Self {
            lower: 400,
            upper: 900,
        }
    }
}

impl TokenBand {
    /// Creates a band.
    pub fn new(lower: usize, upper: usize) -> Self {
        Self { lower, upper }
    }

    /// Returns true if `tokens` falls inside the band.
    pub fn contains(&self, tokens: usize) -> bool {
        tokens >= self.lower && tokens <= self.upper
    }
}

/// A section whose size falls outside the target band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutOfBand {
    /// Section title.
    pub title: String,
    /// The section's own token count.
    pub token_count: usize,
    /// Ancestor-to-self title path.
    pub breadcrumb: String,
}

/// Lists sections outside `band`, in pre-order.
pub fn out_of_band(tree: &SectionTree, counts: &TokenCounts, band: TokenBand) -> Vec<OutOfBand> {
    tree.iter_preorder()
        .filter(|&id| !band.contains(counts.get(id)))
        .map(|id| OutOfBand {
            title: tree.get(id).title.clone(),
            token_count: counts.get(id),
            breadcrumb: tree.breadcrumb(id),
        })
        .collect()
}
