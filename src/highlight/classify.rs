//! Single-line classification
//!
//! `classify` turns one line of text plus the lexical state entering it into
//! resolved style runs and the state leaving it. Nothing outside the line is
//! consulted except that incoming state.

use std::ops::Range;

use super::rules::{HighlightRules, StyleTag};

/// Opening and closing marker of a fenced code block.
pub const FENCE_MARKER: &str = "```";

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Lexical state carried from one line into the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LexState {
    #[default]
    Normal,
    /// Inside a fenced code block that has not been closed yet
    InFence,
}

impl LexState {
    pub fn is_in_fence(&self) -> bool {
        matches!(self, LexState::InFence)
    }
}

/// A run of bytes within one line sharing a style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    /// Byte offset where the run starts
    pub start: usize,
    /// Length of the run in bytes
    pub len: usize,
    pub tag: StyleTag,
}

impl StyledSpan {
    pub fn new(start: usize, len: usize, tag: StyleTag) -> Self {
        Self { start, len, tag }
    }

    /// Byte offset one past the end of the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHighlight {
    /// Sorted, non-overlapping runs covering the whole line
    pub spans: Vec<StyledSpan>,
    /// State entering the next line
    pub outgoing: LexState,
}

impl LineHighlight {
    /// Tag of the byte at `offset`, if the offset is inside the line.
    pub fn tag_at(&self, offset: usize) -> Option<StyleTag> {
        self.spans
            .iter()
            .find(|span| span.contains(offset))
            .map(|span| span.tag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Classify a single line.
///
/// 1. Inside a fence the whole line is `FencedCodeBlock`; a line ending in
///    the fence marker (after trimming trailing whitespace) closes it.
/// 2. A line starting with the fence marker opens a fence.
/// 3. Otherwise every rule in the table is applied in order, later rules
///    overwriting earlier ones byte by byte.
///
/// An empty line produces no spans.
pub fn classify(rules: &HighlightRules, line: &str, incoming: LexState) -> LineHighlight {
    if incoming.is_in_fence() {
        let outgoing = if closes_fence(line) {
            LexState::Normal
        } else {
            LexState::InFence
        };
        return whole_line(line, StyleTag::FencedCodeBlock, outgoing);
    }

    if opens_fence(line) {
        return whole_line(line, StyleTag::FencedCodeBlock, LexState::InFence);
    }

    let mut tags: Vec<Option<StyleTag>> = vec![None; line.len()];
    for rule in rules.iter() {
        for range in rule.find_all(line) {
            // Ranges come from the regex engine and always lie inside the line
            if let Some(slot) = tags.get_mut(range) {
                slot.fill(Some(rule.tag()));
            }
        }
    }

    LineHighlight {
        spans: resolve_runs(&tags),
        outgoing: LexState::Normal,
    }
}

/// Whether a line outside a fence opens one.
pub fn opens_fence(line: &str) -> bool {
    line.starts_with(FENCE_MARKER)
}

/// Whether a line inside a fence closes it.
pub fn closes_fence(line: &str) -> bool {
    line.trim_end().ends_with(FENCE_MARKER)
}

fn whole_line(line: &str, tag: StyleTag, outgoing: LexState) -> LineHighlight {
    let spans = if line.is_empty() {
        Vec::new()
    } else {
        vec![StyledSpan::new(0, line.len(), tag)]
    };
    LineHighlight { spans, outgoing }
}

/// Collapse per-byte tags into runs; untagged bytes become `PlainText`.
fn resolve_runs(tags: &[Option<StyleTag>]) -> Vec<StyledSpan> {
    let mut spans: Vec<StyledSpan> = Vec::new();

    for (offset, tag) in tags.iter().enumerate() {
        let tag = tag.unwrap_or(StyleTag::PlainText);
        match spans.last_mut() {
            Some(last) if last.tag == tag && last.end() == offset => last.len += 1,
            _ => spans.push(StyledSpan::new(offset, 1, tag)),
        }
    }

    spans
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> LineHighlight {
        classify(&HighlightRules::new(), line, LexState::Normal)
    }

    fn tags(highlight: &LineHighlight) -> Vec<(usize, usize, StyleTag)> {
        highlight
            .spans
            .iter()
            .map(|s| (s.start, s.end(), s.tag))
            .collect()
    }

    #[test]
    fn test_empty_line_has_no_spans() {
        let result = run("");
        assert!(result.spans.is_empty());
        assert_eq!(result.outgoing, LexState::Normal);

        let inside = classify(&HighlightRules::new(), "", LexState::InFence);
        assert!(inside.spans.is_empty());
        assert_eq!(inside.outgoing, LexState::InFence);
    }

    #[test]
    fn test_plain_line_is_one_plain_run() {
        assert_eq!(tags(&run("Done.")), vec![(0, 5, StyleTag::PlainText)]);
    }

    #[test]
    fn test_headings_cover_whole_line() {
        assert_eq!(tags(&run("# Title")), vec![(0, 7, StyleTag::Heading1)]);
        assert_eq!(tags(&run("## Sub")), vec![(0, 6, StyleTag::Heading2)]);
        assert_eq!(tags(&run("### Three")), vec![(0, 9, StyleTag::Heading3)]);
        assert_eq!(tags(&run("#### Four")), vec![(0, 9, StyleTag::Heading4)]);
    }

    #[test]
    fn test_heading_requires_space_and_level_limit() {
        assert_eq!(tags(&run("#tag")), vec![(0, 4, StyleTag::PlainText)]);
        assert_eq!(tags(&run("##### Five")), vec![(0, 10, StyleTag::PlainText)]);
    }

    #[test]
    fn test_bold_and_italic_on_one_line() {
        let result = run("Some **bold** and *italic*.");
        assert_eq!(
            tags(&result),
            vec![
                (0, 5, StyleTag::PlainText),
                (5, 13, StyleTag::Bold),
                (13, 18, StyleTag::PlainText),
                (18, 26, StyleTag::Italic),
                (26, 27, StyleTag::PlainText),
            ]
        );
    }

    #[test]
    fn test_later_rules_overwrite_earlier_ones() {
        // Bold is applied after the heading rule
        let result = run("# a **b**");
        assert_eq!(result.tag_at(0), Some(StyleTag::Heading1));
        assert_eq!(result.tag_at(5), Some(StyleTag::Bold));

        // Block quote is applied last and tags the whole line
        let quote = run("> **loud** `code`");
        assert_eq!(tags(&quote), vec![(0, 17, StyleTag::BlockQuote)]);
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(
            tags(&run("- item")),
            vec![(0, 2, StyleTag::ListMarker), (2, 6, StyleTag::PlainText)]
        );
        assert_eq!(
            tags(&run("3. third")),
            vec![(0, 3, StyleTag::ListMarker), (3, 8, StyleTag::PlainText)]
        );
    }

    #[test]
    fn test_link_and_inline_code() {
        let result = run("[a](b) `c`");
        assert_eq!(
            tags(&result),
            vec![
                (0, 6, StyleTag::Link),
                (6, 7, StyleTag::PlainText),
                (7, 10, StyleTag::InlineCode),
            ]
        );
    }

    #[test]
    fn test_fence_open_and_close() {
        let rules = HighlightRules::new();

        let open = classify(&rules, "```python", LexState::Normal);
        assert_eq!(tags(&open), vec![(0, 9, StyleTag::FencedCodeBlock)]);
        assert_eq!(open.outgoing, LexState::InFence);

        let body = classify(&rules, "# not a heading", LexState::InFence);
        assert_eq!(tags(&body), vec![(0, 15, StyleTag::FencedCodeBlock)]);
        assert_eq!(body.outgoing, LexState::InFence);

        let close = classify(&rules, "```", LexState::InFence);
        assert_eq!(close.outgoing, LexState::Normal);
    }

    #[test]
    fn test_closing_fence_with_trailing_whitespace() {
        let result = classify(&HighlightRules::new(), "```  \t", LexState::InFence);
        assert_eq!(result.outgoing, LexState::Normal);
        assert_eq!(tags(&result), vec![(0, 6, StyleTag::FencedCodeBlock)]);
    }

    #[test]
    fn test_fence_must_start_the_line() {
        let result = run("  ```");
        assert_eq!(result.outgoing, LexState::Normal);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let rules = HighlightRules::new();
        for line in ["Some **bold** text", "```rust", "- [x](y)", ""] {
            for state in [LexState::Normal, LexState::InFence] {
                assert_eq!(classify(&rules, line, state), classify(&rules, line, state));
            }
        }
    }

    #[test]
    fn test_runs_cover_line_without_gaps() {
        let line = "1. **a** _b_ [c](d) `e` é";
        let result = run(line);
        let mut expected_start = 0;
        for span in &result.spans {
            assert_eq!(span.start, expected_start);
            assert!(span.len > 0);
            expected_start = span.end();
        }
        assert_eq!(expected_start, line.len());
    }
}
