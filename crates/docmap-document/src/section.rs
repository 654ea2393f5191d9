//! Section nodes of the document tree.
//!
//! Sections live in an arena owned by [`SectionTree`](crate::SectionTree) and refer to each
//! other by [`SectionId`]. The parent link is a plain index used only to derive identifiers and
//! breadcrumbs; ownership flows exclusively through the arena.

/// Index of a section within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub(crate) usize);

impl SectionId {
    /// Position of the section in the arena (document order of its header).
    pub fn index(self) -> usize {
        self.0
    }
}

/// A section anchored at one markdown header.
#[derive(Debug, Clone)]
pub struct Section {
    /// Header text, trimmed.
    pub title: String,

    /// Header depth: 1-6 for `#` through `######`.
    pub level: u8,

    /// 1-based line number of the header in the source.
    pub line_number: usize,

    /// Body text between this header and the next header of any level, trimmed.
    ///
    /// Child sections' bodies are not included.
    pub content: String,

    /// Enclosing section, or `None` for a root.
    pub parent: Option<SectionId>,

    /// Nested sections in document order.
    pub children: Vec<SectionId>,
}

impl Section {
    /// Creates an unattached section with empty content.
    pub fn new(title: impl Into<String>, level: u8, line_number: usize) -> Self {
        Self {
            title: title.into(),
            level,
            line_number,
            content: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns true if this section has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns true if this section has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_section_is_unattached() {
        let section = Section::new("Overview", 2, 14);
        assert_eq!(section.title, "Overview");
        assert_eq!(section.level, 2);
        assert_eq!(section.line_number, 14);
        assert!(section.content.is_empty());
        assert!(section.is_root());
        assert!(section.is_leaf());
    }

    #[test]
    fn test_section_id_index() {
        assert_eq!(SectionId(3).index(), 3);
        assert!(SectionId(1) < SectionId(2));
    }
}
