//! Markdown formatting commands
//!
//! Toolbar and shortcut actions for the raw editor. Each command is turned
//! into a single text replacement (`FormatEdit`) that the document applies
//! through its buffer, so highlighting stays incremental.
//!
//! # Supported Formatting Commands
//! - **Inline**: Bold, Italic, Inline Code, Link, Image
//! - **Line prefixes**: Headings (1-4), Bullet List, Numbered List, Blockquote
//! - **Blocks**: Code Block, Horizontal Rule
//!
//! # Usage
//! ```ignore
//! use inkpad::editor::{format_edit, FormatCommand};
//!
//! let edit = format_edit("Hello world", (0, 5), FormatCommand::Bold);
//! assert_eq!(edit.replacement, "**Hello**");
//! ```

use std::ops::Range;

use crate::string_utils::{ceil_char_boundary, floor_char_boundary};

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting commands that can be applied at the caret or selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Inline code (`code`)
    InlineCode,
    /// Link ([text](url))
    Link,
    /// Image (![alt](url))
    Image,
    /// Fenced code block
    CodeBlock,
    /// Heading level 1-4, replacing any existing marker
    Heading(u8),
    BulletList,
    NumberedList,
    Blockquote,
    HorizontalRule,
}

impl FormatCommand {
    /// Keyboard shortcut label shown next to the command.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            Self::Bold => "Ctrl+B",
            Self::Italic => "Ctrl+I",
            Self::InlineCode => "Ctrl+`",
            Self::Link => "Ctrl+K",
            Self::Image => "Ctrl+Shift+K",
            Self::CodeBlock => "Ctrl+Shift+C",
            Self::Heading(1) => "Ctrl+1",
            Self::Heading(2) => "Ctrl+2",
            Self::Heading(3) => "Ctrl+3",
            Self::Heading(_) => "Ctrl+4",
            Self::BulletList => "Ctrl+Shift+B",
            Self::NumberedList => "Ctrl+Shift+N",
            Self::Blockquote => "Ctrl+Q",
            Self::HorizontalRule => "Ctrl+Shift+H",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Edit
// ─────────────────────────────────────────────────────────────────────────────

/// A single replacement produced by a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    /// Byte range of the original text to replace
    pub range: Range<usize>,
    pub replacement: String,
    /// Caret offset in the text after the edit
    pub cursor: usize,
}

impl FormatEdit {
    /// Apply the edit to a string (for hosts that keep plain text).
    pub fn apply_to(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.replacement.len());
        out.push_str(&text[..self.range.start]);
        out.push_str(&self.replacement);
        out.push_str(&text[self.range.end..]);
        out
    }
}

/// Build the edit for `command` given a selection `(start, end)`.
///
/// Equal offsets mean no selection; the caret is at that offset. Offsets are
/// clamped to the text and to char boundaries.
pub fn format_edit(text: &str, selection: (usize, usize), command: FormatCommand) -> FormatEdit {
    let start = floor_char_boundary(text, selection.0.min(selection.1));
    let end = ceil_char_boundary(text, selection.0.max(selection.1));

    match command {
        FormatCommand::Bold => wrap_selection(text, start..end, "**", "**"),
        FormatCommand::Italic => wrap_selection(text, start..end, "*", "*"),
        FormatCommand::InlineCode => wrap_selection(text, start..end, "`", "`"),
        FormatCommand::Link => wrap_selection(text, start..end, "[", "](url)"),
        FormatCommand::Image => wrap_selection(text, start..end, "![", "](url)"),
        FormatCommand::BulletList => prefix_line(text, start, "- "),
        FormatCommand::NumberedList => prefix_line(text, start, "1. "),
        FormatCommand::Blockquote => prefix_line(text, start, "> "),
        FormatCommand::Heading(level) => heading(text, start, level),
        FormatCommand::CodeBlock => code_block(text, start..end),
        FormatCommand::HorizontalRule => FormatEdit {
            range: start..end,
            replacement: "\n---\n".to_string(),
            cursor: start + 5,
        },
    }
}

/// Wrap the selection, or insert the empty pair with the caret between.
fn wrap_selection(text: &str, range: Range<usize>, left: &str, right: &str) -> FormatEdit {
    let selected = &text[range.clone()];
    let replacement = format!("{}{}{}", left, selected, right);
    let cursor = if selected.is_empty() {
        range.start + left.len()
    } else {
        range.start + replacement.len()
    };
    FormatEdit {
        range,
        replacement,
        cursor,
    }
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn prefix_line(text: &str, caret: usize, prefix: &str) -> FormatEdit {
    let start = line_start(text, caret);
    FormatEdit {
        range: start..start,
        replacement: prefix.to_string(),
        cursor: caret + prefix.len(),
    }
}

/// Replace the line's leading `#` run (and one following space) with the
/// marker for `level`.
fn heading(text: &str, caret: usize, level: u8) -> FormatEdit {
    let level = level.clamp(1, 4) as usize;
    let start = line_start(text, caret);
    let line = &text[start..];

    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    let existing = if hashes > 0 && line.as_bytes().get(hashes) == Some(&b' ') {
        hashes + 1
    } else {
        hashes
    };

    let replacement = format!("{} ", "#".repeat(level));
    let cursor = if caret >= start + existing {
        caret - existing + replacement.len()
    } else {
        start + replacement.len()
    };

    FormatEdit {
        range: start..start + existing,
        replacement,
        cursor,
    }
}

/// Fence the selection, or insert an empty block with the caret inside.
fn code_block(text: &str, range: Range<usize>) -> FormatEdit {
    let selected = &text[range.clone()];
    let replacement = format!("```\n{}\n```", selected);
    let cursor = if selected.is_empty() {
        range.start + 4
    } else {
        range.start + replacement.len()
    };
    FormatEdit {
        range,
        replacement,
        cursor,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
