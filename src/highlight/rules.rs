//! Style tags and the ordered highlight rule table
//!
//! Rules are applied to a line in table order. Each rule re-scans the whole
//! line and overwrites whatever earlier rules tagged, so the order of the
//! table is part of the highlighting behavior.

use std::ops::Range;

use log::{debug, warn};
use regex::Regex;

use crate::string_utils::ceil_char_boundary;

// ─────────────────────────────────────────────────────────────────────────────
// Style Tags
// ─────────────────────────────────────────────────────────────────────────────

/// Semantic style of a run of characters in the raw editor.
///
/// Only the tag is decided here; fonts and colors are looked up by the host
/// (see `theme::HighlightPalette`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Bold,
    Italic,
    ListMarker,
    Link,
    InlineCode,
    FencedCodeBlock,
    BlockQuote,
    PlainText,
}

impl StyleTag {
    /// Heading tag for a level in `1..=4`.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(StyleTag::Heading1),
            2 => Some(StyleTag::Heading2),
            3 => Some(StyleTag::Heading3),
            4 => Some(StyleTag::Heading4),
            _ => None,
        }
    }

    /// Heading level if this is a heading tag.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            StyleTag::Heading1 => Some(1),
            StyleTag::Heading2 => Some(2),
            StyleTag::Heading3 => Some(3),
            StyleTag::Heading4 => Some(4),
            _ => None,
        }
    }

    /// Stable name used by the CLI output and logs.
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Heading1 => "Heading1",
            StyleTag::Heading2 => "Heading2",
            StyleTag::Heading3 => "Heading3",
            StyleTag::Heading4 => "Heading4",
            StyleTag::Bold => "Bold",
            StyleTag::Italic => "Italic",
            StyleTag::ListMarker => "ListMarker",
            StyleTag::Link => "Link",
            StyleTag::InlineCode => "InlineCode",
            StyleTag::FencedCodeBlock => "FencedCodeBlock",
            StyleTag::BlockQuote => "BlockQuote",
            StyleTag::PlainText => "PlainText",
        }
    }

    /// All tags, in declaration order.
    pub fn all() -> &'static [StyleTag] {
        &[
            StyleTag::Heading1,
            StyleTag::Heading2,
            StyleTag::Heading3,
            StyleTag::Heading4,
            StyleTag::Bold,
            StyleTag::Italic,
            StyleTag::ListMarker,
            StyleTag::Link,
            StyleTag::InlineCode,
            StyleTag::FencedCodeBlock,
            StyleTag::BlockQuote,
            StyleTag::PlainText,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule
// ─────────────────────────────────────────────────────────────────────────────

/// A single-line pattern and the tag it writes.
#[derive(Debug)]
pub(crate) struct Rule {
    /// Name for logs
    name: &'static str,
    pattern: Regex,
    tag: StyleTag,
    /// When set, a match whose first or last byte touches another copy of
    /// this delimiter is rejected (single `*` inside a `**` run).
    lone_delimiter: Option<u8>,
}

impl Rule {
    /// Compile a rule. An invalid pattern is logged and the rule is dropped.
    fn new(name: &'static str, pattern: &str, tag: StyleTag) -> Option<Self> {
        match Regex::new(pattern) {
            Ok(pattern) => Some(Self {
                name,
                pattern,
                tag,
                lone_delimiter: None,
            }),
            Err(e) => {
                warn!("Skipping highlight rule '{}': {}", name, e);
                None
            }
        }
    }

    fn lone(mut self, delimiter: u8) -> Self {
        self.lone_delimiter = Some(delimiter);
        self
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn tag(&self) -> StyleTag {
        self.tag
    }

    /// Byte ranges of every accepted, non-overlapping match in `line`.
    pub(crate) fn find_all(&self, line: &str) -> Vec<Range<usize>> {
        let bytes = line.as_bytes();
        let mut ranges = Vec::new();
        let mut pos = 0;

        while pos < line.len() {
            let Some(m) = self.pattern.find_at(line, pos) else {
                break;
            };

            if m.start() < m.end() && self.accepts(bytes, m.start(), m.end()) {
                ranges.push(m.start()..m.end());
                pos = m.end();
            } else {
                // Retry one character further on
                pos = ceil_char_boundary(line, m.start() + 1).max(m.start() + 1);
            }
        }

        ranges
    }

    fn accepts(&self, bytes: &[u8], start: usize, end: usize) -> bool {
        let Some(delimiter) = self.lone_delimiter else {
            return true;
        };
        let before = start.checked_sub(1).and_then(|i| bytes.get(i)).copied();
        let after = bytes.get(end).copied();
        before != Some(delimiter) && after != Some(delimiter)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule Table
// ─────────────────────────────────────────────────────────────────────────────

/// The compiled, ordered rule table.
///
/// Built once per highlighter; there is no process-wide instance.
#[derive(Debug)]
pub struct HighlightRules {
    rules: Vec<Rule>,
}

impl HighlightRules {
    /// Compile the Markdown rule table.
    pub fn new() -> Self {
        let table = vec![
            Rule::new("heading1", r"^# .+$", StyleTag::Heading1),
            Rule::new("heading2", r"^## .+$", StyleTag::Heading2),
            Rule::new("heading3", r"^### .+$", StyleTag::Heading3),
            Rule::new("heading4", r"^#### .+$", StyleTag::Heading4),
            Rule::new("bold_asterisk", r"\*\*.+?\*\*", StyleTag::Bold),
            Rule::new("bold_underscore", r"__.+?__", StyleTag::Bold),
            Rule::new("italic_asterisk", r"\*[^*]+?\*", StyleTag::Italic).map(|r| r.lone(b'*')),
            Rule::new("italic_underscore", r"_[^_]+?_", StyleTag::Italic).map(|r| r.lone(b'_')),
            Rule::new("bullet_marker", r"^[*\-+] ", StyleTag::ListMarker),
            Rule::new("number_marker", r"^\d+\. ", StyleTag::ListMarker),
            Rule::new("link", r"\[.+?\]\(.+?\)", StyleTag::Link),
            Rule::new("inline_code", r"`[^`]+`", StyleTag::InlineCode),
            Rule::new("blockquote", r"^> .+$", StyleTag::BlockQuote),
        ];

        let rules: Vec<Rule> = table.into_iter().flatten().collect();
        debug!(
            "Compiled {} highlight rules: {}",
            rules.len(),
            rules.iter().map(Rule::name).collect::<Vec<_>>().join(", ")
        );
        Self { rules }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for HighlightRules {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
