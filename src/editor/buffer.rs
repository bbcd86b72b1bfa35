//! Line-oriented text buffer
//!
//! The buffer owns the document text as a list of lines (without their `\n`
//! terminators). Offsets are byte offsets into the joined text; every mutation
//! reports which range of lines was spliced so the highlighter can follow.

use std::borrow::Cow;
use std::ops::Range;

use crate::highlight::LineSource;
use crate::string_utils::floor_char_boundary;

/// Lines spliced by a buffer mutation.
///
/// `removed` old lines starting at `first_line` were replaced by `inserted`
/// new lines starting at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditDelta {
    pub first_line: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl EditDelta {
    /// Whether no line was touched.
    pub fn is_empty(&self) -> bool {
        self.removed == 0 && self.inserted == 0
    }
}

/// Document text split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    /// Never empty; an empty document is one empty line
    lines: Vec<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from text. `\r\n` line endings are normalized to `\n`.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// The full text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the joined text in bytes.
    pub fn len(&self) -> usize {
        self.lines.iter().map(String::len).sum::<usize>() + self.lines.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset where a line starts.
    pub fn line_start(&self, index: usize) -> Option<usize> {
        if index >= self.lines.len() {
            return None;
        }
        Some(self.lines[..index].iter().map(|l| l.len() + 1).sum())
    }

    /// `(line, column)` of an offset; both clamped, column floored to a char
    /// boundary within the line.
    pub fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (index, line) in self.lines.iter().enumerate() {
            if remaining <= line.len() {
                return (index, floor_char_boundary(line, remaining));
            }
            remaining -= line.len() + 1;
        }
        let last = self.lines.len() - 1;
        (last, self.lines[last].len())
    }

    /// Offset of a `(line, column)` position, clamped to the buffer.
    pub fn position_to_offset(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.lines.len() - 1);
        let start = self.line_start(line).unwrap_or(0);
        start + floor_char_boundary(&self.lines[line], column)
    }

    /// Clamp an offset to the buffer and to a char boundary.
    pub fn clamp_offset(&self, offset: usize) -> usize {
        let (line, column) = self.offset_to_position(offset);
        self.position_to_offset(line, column)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn insert(&mut self, offset: usize, text: &str) -> EditDelta {
        self.replace(offset..offset, text)
    }

    pub fn delete(&mut self, range: Range<usize>) -> EditDelta {
        self.replace(range, "")
    }

    /// Replace a byte range with `text`. The range is clamped and reordered
    /// if reversed. `\r\n` in `text` is stored as `\n`, so the inserted
    /// length is `normalize_line_endings(text).len()`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> EditDelta {
        let (a, b) = (range.start.min(range.end), range.start.max(range.end));
        let (first, start_col) = self.offset_to_position(a);
        let (last, end_col) = self.offset_to_position(b);
        let text = normalize_line_endings(text);

        let mut spliced = String::with_capacity(text.len() + 16);
        spliced.push_str(&self.lines[first][..start_col]);
        spliced.push_str(&text);
        spliced.push_str(&self.lines[last][end_col..]);

        let new_lines: Vec<String> = spliced.split('\n').map(str::to_string).collect();
        let delta = EditDelta {
            first_line: first,
            removed: last - first + 1,
            inserted: new_lines.len(),
        };
        self.lines.splice(first..=last, new_lines);
        delta
    }

    /// Replace the whole text, splicing only the lines between the common
    /// leading and trailing lines.
    pub fn set_text(&mut self, text: &str) -> EditDelta {
        let new_lines = split_lines(text);

        let prefix = self
            .lines
            .iter()
            .zip(&new_lines)
            .take_while(|(old, new)| old == new)
            .count();
        let max_suffix = self.lines.len().min(new_lines.len()) - prefix;
        let suffix = self
            .lines
            .iter()
            .rev()
            .zip(new_lines.iter().rev())
            .take(max_suffix)
            .take_while(|(old, new)| old == new)
            .count();

        let removed = self.lines.len() - prefix - suffix;
        let inserted = new_lines.len() - prefix - suffix;
        let replacement = new_lines[prefix..prefix + inserted].to_vec();
        self.lines.splice(prefix..prefix + removed, replacement);

        EditDelta {
            first_line: prefix,
            removed,
            inserted,
        }
    }
}

impl LineSource for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, index: usize) -> Option<&str> {
        self.line(index)
    }
}

/// Convert `\r\n` to `\n`, the only line ending the buffer stores.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
