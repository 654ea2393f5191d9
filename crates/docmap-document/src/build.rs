//! Tree construction from markdown content.
//!
//! The builder makes a single forward pass over the document lines, keeping a stack of the
//! currently open sections ordered by level. On each header:
//!
//! 1. The accumulated body lines are flushed (trimmed) into the most recently opened section
//! 2. Sections at the new header's level or deeper are closed (popped)
//! 3. The new section becomes the last child of the stack top, or a new root if the stack is empty
//! 4. The new section is pushed
//!
//! Body lines before the first header belong to no section and are dropped. Level jumps are not
//! validated: an h4 directly under an h1 simply becomes its child.

use tracing::{debug, warn};

use crate::{
    scan::{Line, classify, lines},
    section::{Section, SectionId},
    tree::SectionTree,
};

/// Builds the section forest for a document.
pub fn build_section_tree(content: &str) -> SectionTree {
    let mut tree = SectionTree::new();
    let mut stack: Vec<(SectionId, u8)> = Vec::new();
    let mut current: Option<SectionId> = None;
    let mut body: Vec<&str> = Vec::new();

    for (index, line) in lines(content).enumerate() {
        match classify(line) {
            Line::Header(header) => {
                if let Some(open) = current {
                    tree.set_content(open, join_body(&body));
                }
                body.clear();

                while stack.last().is_some_and(|&(_, level)| level >= header.level) {
                    stack.pop();
                }
                let parent = stack.last().map(|&(id, _)| id);

                let section = Section::new(header.title, header.level, index + 1);
                let id = tree.attach(section, parent);
                stack.push((id, header.level));
                current = Some(id);
            }
            Line::Body(text) => {
                if current.is_some() {
                    body.push(text);
                }
            }
        }
    }

    if let Some(open) = current {
        tree.set_content(open, join_body(&body));
    }

    if tree.is_empty() {
        warn!("no headers found, section tree is empty");
    } else {
        debug!(
            sections = tree.len(),
            roots = tree.roots().len(),
            "built section tree"
        );
    }

    tree
}

/// Joins accumulated body lines and trims the result.
fn join_body(body: &[&str]) -> String {
    body.join("\n").trim().to_string()
}
