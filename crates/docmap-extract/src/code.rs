//! Fenced code block extraction.
//!
//! A block opens at a line that starts with three backticks once trimmed; the rest of that line
//! is the language tag. It closes at the next line that starts with three backticks. Interior
//! lines are kept verbatim.
//!
//! A fence that is never closed swallows the rest of the document and produces no block.

use docmap_document::{SectionCursor, lines};
use serde::Serialize;

/// Fence marker.
const FENCE: &str = "```";

/// Language recorded when a fence has no tag.
const DEFAULT_LANGUAGE: &str = "text";

/// A fenced code block found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// `code-<n>`, numbered in discovery order from 1.
    pub id: String,
    /// Title of the enclosing section, or `Document` before the first header.
    pub section: String,
    /// Language tag from the opening fence, `text` if absent.
    pub language: String,
    /// Interior lines joined with `\n`, untrimmed.
    pub content: String,
    /// Number of interior lines.
    pub line_count: usize,
}

/// Extracts every closed, non-empty fenced code block from `content`.
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    let lines: Vec<&str> = lines(content).collect();
    let mut cursor = SectionCursor::new();
    let mut blocks = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if cursor.observe(line) {
            continue;
        }

        let Some(tag) = line.trim().strip_prefix(FENCE) else {
            continue;
        };
        let language = match tag.trim() {
            "" => DEFAULT_LANGUAGE,
            tag => tag,
        };

        let start = i;
        while i < lines.len() && !is_fence(lines[i]) {
            i += 1;
        }
        if i == lines.len() {
            // Unterminated: the remainder of the document is consumed.
            break;
        }
        let body = &lines[start..i];
        i += 1;

        if body.is_empty() {
            continue;
        }
        blocks.push(CodeBlock {
            id: format!("code-{}", blocks.len() + 1),
            section: cursor.current().to_string(),
            language: language.to_string(),
            content: body.join("\n"),
            line_count: body.len(),
        });
    }

    blocks
}

/// Returns true if `line` is a fence marker.
fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_block() {
        let blocks = extract_code_blocks("```python\nx=1\n```");

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.id, "code-1");
        assert_eq!(block.section, "Document");
        assert_eq!(block.language, "python");
        assert_eq!(block.content, "x=1");
        assert_eq!(block.line_count, 1);
    }

    #[test]
    fn test_unterminated_block_yields_nothing() {
        assert!(extract_code_blocks("```python\nx=1\ny=2").is_empty());
    }

    #[test]
    fn test_unterminated_block_swallows_later_blocks() {
        let content = "```rust\nfn main() {}\n```\n```\nopen\n# Header\n";
        let blocks = extract_code_blocks(content);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "rust");
    }

    #[test]
    fn test_default_language() {
        let blocks = extract_code_blocks("```\nplain\n```");
        assert_eq!(blocks[0].language, "text");

        let spaced = extract_code_blocks("```   \nplain\n```");
        assert_eq!(spaced[0].language, "text");
    }

    #[test]
    fn test_language_tag_is_trimmed() {
        let blocks = extract_code_blocks("  ```  bash  \necho hi\n  ```");
        assert_eq!(blocks[0].language, "bash");
    }

    #[test]
    fn test_empty_block_is_dropped() {
        let content = "```\n```\n```js\nlet a;\n```";
        let blocks = extract_code_blocks(content);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, "code-1");
        assert_eq!(blocks[0].language, "js");
    }

    #[test]
    fn test_content_is_verbatim() {
        let content = "```yaml\n  key: value\n\n  other: 1  \n```";
        let blocks = extract_code_blocks(content);

        assert_eq!(blocks[0].content, "  key: value\n\n  other: 1  ");
        assert_eq!(blocks[0].line_count, 3);
    }

    #[test]
    fn test_hash_lines_inside_block_do_not_change_section() {
        let content = "# Setup\n```bash\n# install deps\npip install x\n```\n```sh\nls\n```";
        let blocks = extract_code_blocks(content);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].section, "Setup");
        assert_eq!(blocks[0].content, "# install deps\npip install x");
        assert_eq!(blocks[1].section, "Setup");
    }

    #[test]
    fn test_closing_fence_with_trailing_text_still_closes() {
        let blocks = extract_code_blocks("```\na\n```python\nb");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "a");
    }

    #[test]
    fn test_section_attribution() {
        let content = "```\npre\n```\n## Usage\n```rust\nuse x;\n```";
        let blocks = extract_code_blocks(content);

        assert_eq!(blocks[0].section, "Document");
        assert_eq!(blocks[1].section, "Usage");
        assert_eq!(blocks[1].id, "code-2");
    }
}
