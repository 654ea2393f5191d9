//! Syntax highlighting and terminal styling for docmap.
//!
//! Styling is decided once per process: escape codes are emitted only when stdout is a terminal
//! and `NO_COLOR` is unset. Every helper degrades to plain text otherwise, so piped output and
//! files never contain ANSI sequences.

#![warn(missing_docs)]

use std::{
    env,
    io::{self, IsTerminal},
};

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (for errors).
    pub const RED: &str = "\x1b[31m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Returns true if stdout should receive ANSI styling.
pub fn color_enabled() -> bool {
    env::var_os("NO_COLOR").is_none_or(|v| v.is_empty()) && io::stdout().is_terminal()
}

/// Applies terminal styles, or passes text through when styling is off.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    /// Whether escape codes are emitted.
    enabled: bool,
}

impl Styler {
    /// Creates a styler with styling explicitly on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Creates a styler for stdout.
    pub fn detect() -> Self {
        Self::new(color_enabled())
    }

    /// Returns true if escape codes are emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps `text` in the given codes when enabled.
    fn paint(&self, codes: &[&str], text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = codes.concat();
        out.push_str(text);
        out.push_str(colors::RESET);
        out
    }

    /// Bold cyan.
    pub fn header(&self, text: &str) -> String {
        self.paint(&[colors::BOLD, colors::CYAN], text)
    }

    /// Bold.
    pub fn subheader(&self, text: &str) -> String {
        self.paint(&[colors::BOLD], text)
    }

    /// Dimmed.
    pub fn dim(&self, text: &str) -> String {
        self.paint(&[colors::DIM], text)
    }

    /// Green.
    pub fn success(&self, text: &str) -> String {
        self.paint(&[colors::GREEN], text)
    }

    /// Yellow.
    pub fn warning(&self, text: &str) -> String {
        self.paint(&[colors::YELLOW], text)
    }

    /// Red.
    pub fn error(&self, text: &str) -> String {
        self.paint(&[colors::RED], text)
    }
}

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and JSON.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
    /// When false, content is returned unchanged.
    enabled: bool,
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme, active only when `styler` is.
    pub fn new(styler: Styler) -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
            enabled: styler.enabled(),
        }
    }

    /// Highlights TOML content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights content with the named syntax (extension or name).
    ///
    /// Unknown syntaxes are highlighted as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        if !self.enabled {
            return content.to_string();
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_toml() {
        let hl = Highlighter::new(Styler::new(true));
        let output = hl.highlight_toml("[band]\nlower = 400\n");

        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_highlight_disabled_is_identity() {
        let hl = Highlighter::new(Styler::new(false));
        let toml = "[band]\nlower = 400\n";
        assert_eq!(hl.highlight_toml(toml), toml);
    }

    #[test]
    fn test_unknown_syntax_falls_back() {
        let hl = Highlighter::new(Styler::new(true));
        let output = hl.highlight("plain words\n", "no-such-syntax");
        assert!(output.contains("plain words"));
    }

    #[test]
    fn test_styler_enabled() {
        let styler = Styler::new(true);
        let h = styler.header("Sections");
        assert!(h.starts_with(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
        assert!(styler.warning("w").contains(colors::YELLOW));
    }

    #[test]
    fn test_styler_disabled() {
        let styler = Styler::new(false);
        assert_eq!(styler.header("Sections"), "Sections");
        assert_eq!(styler.dim("x"), "x");
        assert_eq!(styler.error("bad"), "bad");
    }

    #[test]
    fn test_toml_syntax_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
    }
}
