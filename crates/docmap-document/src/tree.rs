//! Section forest and position-derived identifiers.
//!
//! A [`SectionTree`] is an ordered forest: every header that is not nested under an earlier,
//! shallower header starts a new root. Identifiers and breadcrumbs are never stored; they are
//! recomputed from tree position on demand:
//!
//! - root id: `section-<line_number>`
//! - child id: `<parent id>.<1-based index among the parent's children>`
//! - root breadcrumb: its title
//! - child breadcrumb: `<parent breadcrumb> > <title>`

use serde::Serialize;

use crate::{
    section::{Section, SectionId},
    tokens::TokenCounter,
};

/// Separator placed between titles in a breadcrumb.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// An immutable forest of sections built from one document.
#[derive(Debug, Clone, Default)]
pub struct SectionTree {
    /// All sections, in the order their headers appear.
    sections: Vec<Section>,
    /// Top-level sections in document order.
    roots: Vec<SectionId>,
}

impl SectionTree {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section as the last child of `parent`, or as a new root.
    pub(crate) fn attach(&mut self, mut section: Section, parent: Option<SectionId>) -> SectionId {
        let id = SectionId(self.sections.len());
        section.parent = parent;
        section.children.clear();
        self.sections.push(section);
        match parent {
            Some(parent) => self.sections[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Replaces the body text of a section.
    pub(crate) fn set_content(&mut self, id: SectionId, content: String) {
        self.sections[id.0].content = content;
    }

    /// Returns the top-level sections in document order.
    pub fn roots(&self) -> &[SectionId] {
        &self.roots
    }

    /// Returns the section with the given id.
    ///
    /// Ids are only produced by the tree that owns them; passing an id from another tree is a
    /// logic error and panics if out of range.
    pub fn get(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    /// Returns the total number of sections in all trees of the forest.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the document contained no headers.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over every section in pre-order (depth-first, document order).
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Returns the chain of sections from the root down to `id`, inclusive.
    pub fn ancestry(&self, id: SectionId) -> Vec<SectionId> {
        let mut chain = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Returns the number of ancestors above `id` (0 for a root).
    pub fn depth(&self, id: SectionId) -> usize {
        self.ancestry(id).len() - 1
    }

    /// Returns the 1-based position of `id` among its parent's children.
    ///
    /// Roots report their position among the forest's roots.
    pub fn sibling_index(&self, id: SectionId) -> usize {
        let siblings = match self.get(id).parent {
            Some(parent) => &self.get(parent).children,
            None => &self.roots,
        };
        siblings
            .iter()
            .position(|&sibling| sibling == id)
            .map_or(0, |pos| pos + 1)
    }

    /// Returns the hierarchical identifier of a section.
    pub fn id(&self, id: SectionId) -> String {
        let chain = self.ancestry(id);
        let mut result = format!("section-{}", self.get(chain[0]).line_number);
        for &link in &chain[1..] {
            result.push('.');
            result.push_str(&self.sibling_index(link).to_string());
        }
        result
    }

    /// Returns the ancestor-to-self title path of a section.
    pub fn breadcrumb(&self, id: SectionId) -> String {
        self.ancestry(id)
            .into_iter()
            .map(|link| self.get(link).title.as_str())
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR)
    }

    /// Looks up a section by its hierarchical identifier.
    pub fn find(&self, id: &str) -> Option<SectionId> {
        self.iter_preorder().find(|&section| self.id(section) == id)
    }

    /// Counts the tokens in every section's own content.
    pub fn measure(&self, counter: &dyn TokenCounter) -> TokenCounts {
        TokenCounts {
            counter: counter.name(),
            counts: self
                .sections
                .iter()
                .map(|section| counter.count(&section.content))
                .collect(),
        }
    }

    /// Converts the forest into serializable records, one per root.
    pub fn to_records(&self, counts: &TokenCounts, include_content: bool) -> Vec<SectionRecord> {
        self.roots
            .iter()
            .map(|&root| self.record(root, counts, include_content))
            .collect()
    }

    /// Builds the record for one section and its subtree.
    fn record(&self, id: SectionId, counts: &TokenCounts, include_content: bool) -> SectionRecord {
        let section = self.get(id);
        SectionRecord {
            id: self.id(id),
            title: section.title.clone(),
            level: section.level,
            line_number: section.line_number,
            token_count: counts.get(id),
            children: section
                .children
                .iter()
                .map(|&child| self.record(child, counts, include_content))
                .collect(),
            content: include_content.then(|| section.content.clone()),
        }
    }
}

/// Iterator for pre-order traversal of a section forest.
pub struct PreorderIter<'a> {
    /// The forest being walked.
    tree: &'a SectionTree,
    /// Sections still to visit (rightmost pushed first).
    stack: Vec<SectionId>,
}

impl Iterator for PreorderIter<'_> {
    type Item = SectionId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order so leftmost child is processed first
        self.stack
            .extend(self.tree.get(id).children.iter().rev().copied());
        Some(id)
    }
}

/// Per-section token counts, measured once with a single counter.
///
/// Each count covers the section's own content only, never its children's.
#[derive(Debug, Clone)]
pub struct TokenCounts {
    /// Name of the counter that produced the counts.
    counter: &'static str,
    /// Counts indexed by section.
    counts: Vec<usize>,
}

impl TokenCounts {
    /// Returns the token count for a section.
    pub fn get(&self, id: SectionId) -> usize {
        self.counts[id.0]
    }

    /// Returns the name of the counter that produced these counts.
    pub fn counter(&self) -> &'static str {
        self.counter
    }

    /// Iterates over all counts in document order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.iter().copied()
    }
}

/// Serializable form of a section and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRecord {
    /// Hierarchical identifier.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Header depth (1-6).
    pub level: u8,
    /// 1-based source line of the header.
    pub line_number: usize,
    /// Tokens in this section's own content.
    pub token_count: usize,
    /// Nested section records.
    pub children: Vec<Self>,
    /// Raw body text, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
