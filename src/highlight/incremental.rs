//! Incremental highlighting over a line-oriented buffer
//!
//! The highlighter keeps one record per buffer line (state in, state out,
//! resolved spans) and an ordered worklist of dirty lines. The host marks
//! lines dirty after edits; `refresh` drains the worklist lowest line first,
//! cascading to the next line whenever a line's exit state no longer matches
//! what that next line was classified with.

use std::collections::BTreeSet;

use log::{debug, warn};

use super::classify::{classify, LexState, StyledSpan};
use super::rules::HighlightRules;
use crate::editor::EditDelta;

// ─────────────────────────────────────────────────────────────────────────────
// Line Source
// ─────────────────────────────────────────────────────────────────────────────

/// Read access to the lines of a buffer.
pub trait LineSource {
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator.
    fn line_text(&self, index: usize) -> Option<&str>;
}

impl<S: AsRef<str>> LineSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>, const N: usize> LineSource for [S; N] {
    fn line_count(&self) -> usize {
        N
    }

    fn line_text(&self, index: usize) -> Option<&str> {
        self.as_slice().line_text(index)
    }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, index: usize) -> Option<&str> {
        self.as_slice().line_text(index)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineRecord {
    incoming: LexState,
    outgoing: LexState,
    spans: Vec<StyledSpan>,
}

/// Spans recomputed for one line during a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineUpdate {
    pub line: usize,
    pub spans: Vec<StyledSpan>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Incremental Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Per-document highlighting state.
#[derive(Debug)]
pub struct IncrementalHighlighter {
    rules: HighlightRules,
    records: Vec<LineRecord>,
    dirty: BTreeSet<usize>,
}

impl Default for IncrementalHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalHighlighter {
    pub fn new() -> Self {
        Self::with_rules(HighlightRules::new())
    }

    pub fn with_rules(rules: HighlightRules) -> Self {
        Self {
            rules,
            records: Vec::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// Forget everything and mark all `line_count` lines dirty.
    pub fn reset(&mut self, line_count: usize) {
        self.records = vec![LineRecord::default(); line_count];
        self.dirty = (0..line_count).collect();
    }

    /// Number of lines tracked.
    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    /// Mark a single line dirty after its text changed in place.
    pub fn line_changed(&mut self, line: usize) {
        if line < self.records.len() {
            self.dirty.insert(line);
        }
    }

    /// Splice line records to follow an edit and mark the touched lines dirty.
    pub fn apply_delta(&mut self, delta: &EditDelta) {
        let first = delta.first_line.min(self.records.len());
        let removed_end = first.saturating_add(delta.removed).min(self.records.len());
        let removed = removed_end - first;

        self.records.splice(
            first..removed_end,
            std::iter::repeat_with(LineRecord::default).take(delta.inserted),
        );

        // Shift pending work past the splice
        let shifted: BTreeSet<usize> = self
            .dirty
            .iter()
            .filter_map(|&line| {
                if line < first {
                    Some(line)
                } else if line >= removed_end {
                    Some(line - removed + delta.inserted)
                } else {
                    None
                }
            })
            .collect();
        self.dirty = shifted;

        self.dirty.extend(first..first + delta.inserted);
        // The line after the splice now follows different text
        let next = first + delta.inserted;
        if next < self.records.len() {
            self.dirty.insert(next);
        }
    }

    /// Whether any line is waiting to be reclassified.
    pub fn has_pending(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drain the worklist against `source` and return the recomputed lines.
    pub fn refresh<S: LineSource + ?Sized>(&mut self, source: &S) -> Vec<LineUpdate> {
        if self.records.len() != source.line_count() {
            warn!(
                "Highlighter tracks {} lines but buffer has {}; rehighlighting everything",
                self.records.len(),
                source.line_count()
            );
            self.reset(source.line_count());
        }

        let requested = self.dirty.len();
        let mut updates = Vec::new();

        while let Some(line) = self.dirty.pop_first() {
            if line >= self.records.len() {
                continue;
            }

            let incoming = match line {
                0 => LexState::Normal,
                _ => self.records[line - 1].outgoing,
            };
            let text = source.line_text(line).unwrap_or_default();
            let highlight = classify(&self.rules, text, incoming);

            if let Some(next) = self.records.get(line + 1) {
                if next.incoming != highlight.outgoing {
                    self.dirty.insert(line + 1);
                }
            }

            self.records[line] = LineRecord {
                incoming,
                outgoing: highlight.outgoing,
                spans: highlight.spans.clone(),
            };
            updates.push(LineUpdate {
                line,
                spans: highlight.spans,
            });
        }

        if !updates.is_empty() {
            debug!(
                "Rehighlighted {} lines ({} requested, {} cascaded)",
                updates.len(),
                requested,
                updates.len().saturating_sub(requested)
            );
        }

        updates
    }

    /// Resolved spans of a line as of the last refresh.
    pub fn spans(&self, line: usize) -> Option<&[StyledSpan]> {
        self.records.get(line).map(|r| r.spans.as_slice())
    }

    pub fn incoming_state(&self, line: usize) -> Option<LexState> {
        self.records.get(line).map(|r| r.incoming)
    }

    pub fn outgoing_state(&self, line: usize) -> Option<LexState> {
        self.records.get(line).map(|r| r.outgoing)
    }

    /// True when nothing is pending and every line's incoming state equals the
    /// previous line's outgoing state (line 0 entering `Normal`).
    pub fn is_consistent(&self) -> bool {
        if self.has_pending() {
            return false;
        }
        let starts_normal = self
            .records
            .first()
            .map_or(true, |r| r.incoming == LexState::Normal);
        starts_normal
            && self
                .records
                .windows(2)
                .all(|pair| pair[0].outgoing == pair[1].incoming)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::StyleTag;

    fn highlighted(lines: &[&str]) -> IncrementalHighlighter {
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(lines.len());
        highlighter.refresh(lines);
        highlighter
    }

    fn only_tag(highlighter: &IncrementalHighlighter, line: usize) -> Option<StyleTag> {
        match highlighter.spans(line)? {
            [span] => Some(span.tag),
            _ => None,
        }
    }

    #[test]
    fn test_end_to_end_document() {
        let lines = [
            "# Title",
            "Some **bold** and *italic*.",
            "```python",
            "x = 1",
            "```",
            "Done.",
        ];
        let highlighter = highlighted(&lines);

        assert_eq!(only_tag(&highlighter, 0), Some(StyleTag::Heading1));

        let second = highlighter.spans(1).unwrap();
        assert!(second
            .iter()
            .any(|s| s.tag == StyleTag::Bold && s.start == 5 && s.len == 8));
        assert!(second
            .iter()
            .any(|s| s.tag == StyleTag::Italic && s.start == 18 && s.len == 8));

        for line in 2..=4 {
            assert_eq!(only_tag(&highlighter, line), Some(StyleTag::FencedCodeBlock));
        }
        assert_eq!(only_tag(&highlighter, 5), Some(StyleTag::PlainText));
        assert!(highlighter.is_consistent());
    }

    #[test]
    fn test_fence_range_is_fenced_regardless_of_content() {
        let lines = ["intro", "```", "# heading", "**bold**", "> quote", "```", "after"];
        let highlighter = highlighted(&lines);

        for line in 1..=5 {
            assert_eq!(only_tag(&highlighter, line), Some(StyleTag::FencedCodeBlock));
        }
        assert_eq!(only_tag(&highlighter, 6), Some(StyleTag::PlainText));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let lines = ["```", "a", "b", "c"];
        let highlighter = highlighted(&lines);
        assert_eq!(highlighter.outgoing_state(3), Some(LexState::InFence));
        assert!(highlighter.is_consistent());
    }

    #[test]
    fn test_edit_cascades_until_state_stabilizes() {
        let mut lines = vec!["text", "# one", "# two", "```", "code", "```", "# three"];
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(lines.len());
        highlighter.refresh(&lines);

        // Opening a fence on line 0 pulls everything up to the old opener in
        lines[0] = "```";
        highlighter.line_changed(0);
        let updates = highlighter.refresh(&lines);

        let touched: Vec<usize> = updates.iter().map(|u| u.line).collect();
        assert_eq!(touched.first(), Some(&0));
        assert!(touched.windows(2).all(|w| w[0] < w[1]));
        assert!(highlighter.is_consistent());

        // Line 3 now closes the fence, line 4 is plain text
        assert_eq!(only_tag(&highlighter, 1), Some(StyleTag::FencedCodeBlock));
        assert_eq!(highlighter.outgoing_state(3), Some(LexState::Normal));
        assert_eq!(only_tag(&highlighter, 4), Some(StyleTag::PlainText));
    }

    #[test]
    fn test_local_edit_does_not_cascade() {
        let mut lines = vec!["a", "b", "c", "d"];
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(lines.len());
        highlighter.refresh(&lines);

        lines[1] = "**b**";
        highlighter.line_changed(1);
        let updates = highlighter.refresh(&lines);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].line, 1);
        assert_eq!(only_tag(&highlighter, 1), Some(StyleTag::Bold));
    }

    #[test]
    fn test_apply_delta_inserted_lines() {
        let mut lines = vec!["one", "two", "three"];
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(lines.len());
        highlighter.refresh(&lines);

        // Replace line 1 with a two-line fenced block
        lines.splice(1..2, ["```", "two"]);
        highlighter.apply_delta(&EditDelta {
            first_line: 1,
            removed: 1,
            inserted: 2,
        });
        highlighter.refresh(&lines);

        assert_eq!(highlighter.line_count(), 4);
        assert_eq!(only_tag(&highlighter, 2), Some(StyleTag::FencedCodeBlock));
        assert_eq!(only_tag(&highlighter, 3), Some(StyleTag::FencedCodeBlock));
        assert!(highlighter.is_consistent());
    }

    #[test]
    fn test_apply_delta_removed_lines() {
        let mut lines = vec!["```", "code", "```", "after"];
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(lines.len());
        highlighter.refresh(&lines);

        // Delete the closing fence
        lines.remove(2);
        highlighter.apply_delta(&EditDelta {
            first_line: 2,
            removed: 1,
            inserted: 0,
        });
        highlighter.refresh(&lines);

        assert_eq!(only_tag(&highlighter, 2), Some(StyleTag::FencedCodeBlock));
        assert_eq!(highlighter.outgoing_state(2), Some(LexState::InFence));
        assert!(highlighter.is_consistent());
    }

    #[test]
    fn test_pending_work_shifts_with_delta() {
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(5);
        highlighter.refresh(&["a", "b", "c", "d", "e"]);

        highlighter.line_changed(4);
        highlighter.apply_delta(&EditDelta {
            first_line: 0,
            removed: 0,
            inserted: 2,
        });

        let lines = ["x", "y", "a", "b", "c", "d", "E"];
        let updates = highlighter.refresh(&lines);
        let touched: Vec<usize> = updates.iter().map(|u| u.line).collect();
        assert!(touched.contains(&6));
        assert!(!touched.contains(&4));
    }

    #[test]
    fn test_length_mismatch_rehighlights_everything() {
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(1);
        let updates = highlighter.refresh(&["# a", "b"]);
        assert_eq!(updates.len(), 2);
        assert!(highlighter.is_consistent());
    }

    #[test]
    fn test_empty_document() {
        let highlighter = highlighted(&[]);
        assert_eq!(highlighter.line_count(), 0);
        assert!(highlighter.is_consistent());
        assert_eq!(highlighter.spans(0), None);
    }
}
