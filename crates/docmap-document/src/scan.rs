//! Line-level header detection.
//!
//! A line is a header when it starts with one to six `#` characters, followed by at least one
//! whitespace character and then title text. No other markdown context is considered: a `#`
//! line inside a fenced code block is still a header as far as this scanner is concerned.
//! Every scanner in docmap (the tree builder and each metadata extractor) applies this same
//! rule independently.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an ATX-style header line.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("header pattern is valid"));

/// A header line recognised by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// Number of leading `#` characters (1-6).
    pub level: u8,
    /// Title text with surrounding whitespace removed.
    pub title: &'a str,
}

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A header line.
    Header(Header<'a>),
    /// Any other line, verbatim.
    Body(&'a str),
}

/// Parses `line` as a header, returning `None` for body text.
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let caps = HEADER_RE.captures(line)?;
    let hashes = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str().trim();
    Some(Header {
        level: hashes.len() as u8,
        title,
    })
}

/// Classifies a line.
pub fn classify(line: &str) -> Line<'_> {
    match parse_header(line) {
        Some(header) => Line::Header(header),
        None => Line::Body(line),
    }
}

/// Splits a document into lines on `\n`, keeping any trailing `\r` on each line.
///
/// A trailing newline yields a final empty line, so line numbers match an editor's view.
pub fn lines(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n')
}

/// Tracks the title of the most recent header seen during a line scan.
///
/// Scanners that attribute records to a section each own one of these. Before the first
/// header the section is [`SectionCursor::DOCUMENT`].
#[derive(Debug, Clone)]
pub struct SectionCursor {
    /// Title of the current section.
    current: String,
}

impl Default for SectionCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionCursor {
    /// Section name used for content that precedes every header.
    pub const DOCUMENT: &'static str = "Document";

    /// Creates a cursor positioned before the first header.
    pub fn new() -> Self {
        Self {
            current: Self::DOCUMENT.to_string(),
        }
    }

    /// Advances past `line`; returns true if it was a header.
    pub fn observe(&mut self, line: &str) -> bool {
        match parse_header(line) {
            Some(header) => {
                self.current.clear();
                self.current.push_str(header.title);
                true
            }
            None => false,
        }
    }

    /// Title of the section the scan is currently inside.
    pub fn current(&self) -> &str {
        &self.current
    }
}
