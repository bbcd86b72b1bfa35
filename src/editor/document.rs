//! Editing session for one document
//!
//! `Document` owns the text buffer and keeps the incremental highlighter, the
//! caret's delimiter match, the saved state and the undo history in step with
//! every edit. Hosts feed it edits and caret moves and paint what it returns.

use std::ops::Range;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Settings;
use crate::editor::brackets::{find_match, DelimiterMatch};
use crate::editor::buffer::{normalize_line_endings, EditDelta, TextBuffer};
use crate::editor::formatting::{format_edit, FormatCommand};
use crate::error::{Error, Result};
use crate::files::{read_file, write_file};
use crate::highlight::{IncrementalHighlighter, LineUpdate, StyledSpan};

/// Maximum undo history size
const MAX_UNDO_SIZE: usize = 100;

/// One open document.
#[derive(Debug)]
pub struct Document {
    /// File path (None for new documents)
    path: Option<PathBuf>,
    buffer: TextBuffer,
    highlighter: IncrementalHighlighter,
    /// Caret byte offset
    caret: usize,
    /// Transient match for the delimiter before the caret
    bracket_match: Option<DelimiterMatch>,
    bracket_matching: bool,
    /// Text as last loaded or saved
    saved_text: String,
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty, untitled document.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create an untitled document holding `text`. It starts unmodified.
    pub fn from_text(text: &str) -> Self {
        let buffer = TextBuffer::from_text(text);
        let mut highlighter = IncrementalHighlighter::new();
        highlighter.reset(buffer.line_count());
        highlighter.refresh(&buffer);

        Self {
            path: None,
            saved_text: buffer.text(),
            buffer,
            highlighter,
            caret: 0,
            bracket_match: None,
            bracket_matching: true,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Open a document from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let text = read_file(path)?;
        let mut document = Self::from_text(&text);
        document.path = Some(path.to_path_buf());
        info!(
            "Opened {} ({} lines)",
            path.display(),
            document.buffer.line_count()
        );
        Ok(document)
    }

    /// Apply the editor-related user settings.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_bracket_matching(settings.bracket_matching);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn highlighter(&self) -> &IncrementalHighlighter {
        &self.highlighter
    }

    /// Resolved spans for a line.
    pub fn spans(&self, line: usize) -> Option<&[StyledSpan]> {
        self.highlighter.spans(line)
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn bracket_match(&self) -> Option<DelimiterMatch> {
        self.bracket_match
    }

    /// Whether the text differs from what was last loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.buffer.text() != self.saved_text
    }

    /// Display title: the file name or "Untitled", with `*` when modified.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caret & Bracket Matching
    // ─────────────────────────────────────────────────────────────────────────

    /// Move the caret and recompute the delimiter match.
    pub fn set_caret(&mut self, offset: usize) -> Option<DelimiterMatch> {
        self.caret = self.buffer.clamp_offset(offset);
        self.update_bracket_match();
        self.bracket_match
    }

    pub fn set_bracket_matching(&mut self, enabled: bool) {
        self.bracket_matching = enabled;
        self.update_bracket_match();
    }

    fn update_bracket_match(&mut self) {
        self.bracket_match = None;
        if self.bracket_matching {
            self.bracket_match = find_match(&self.buffer.text(), self.caret);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert text and leave the caret after it.
    pub fn insert(&mut self, offset: usize, text: &str) -> Vec<LineUpdate> {
        let offset = self.buffer.clamp_offset(offset);
        let caret = offset + normalize_line_endings(text).len();
        self.edit(caret, |buffer| buffer.insert(offset, text))
    }

    /// Delete a range and leave the caret at its start.
    pub fn delete(&mut self, range: Range<usize>) -> Vec<LineUpdate> {
        let start = self.buffer.clamp_offset(range.start.min(range.end));
        self.edit(start, |buffer| buffer.delete(range))
    }

    /// Replace a range and leave the caret after the new text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Vec<LineUpdate> {
        let start = self.buffer.clamp_offset(range.start.min(range.end));
        let caret = start + normalize_line_endings(text).len();
        self.edit(caret, |buffer| buffer.replace(range, text))
    }

    /// Replace the whole text (e.g. after an external edit).
    pub fn set_text(&mut self, text: &str) -> Vec<LineUpdate> {
        let caret = self.caret;
        self.edit(caret, |buffer| buffer.set_text(text))
    }

    /// Apply a formatting command to a selection `(start, end)`.
    pub fn apply_format(
        &mut self,
        command: FormatCommand,
        selection: (usize, usize),
    ) -> Vec<LineUpdate> {
        let format = format_edit(&self.buffer.text(), selection, command);
        debug!("Applying {:?} at {:?}", command, format.range);
        self.edit(format.cursor, |buffer| {
            buffer.replace(format.range.clone(), &format.replacement)
        })
    }

    fn edit<F>(&mut self, caret: usize, apply: F) -> Vec<LineUpdate>
    where
        F: FnOnce(&mut TextBuffer) -> EditDelta,
    {
        let before = self.buffer.text();
        let delta = apply(&mut self.buffer);
        if self.buffer.text() == before {
            return Vec::new();
        }

        self.undo_stack.push(before);
        if self.undo_stack.len() > MAX_UNDO_SIZE {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();

        self.after_change(delta, caret)
    }

    fn after_change(&mut self, delta: EditDelta, caret: usize) -> Vec<LineUpdate> {
        self.highlighter.apply_delta(&delta);
        let updates = self.highlighter.refresh(&self.buffer);
        self.set_caret(caret);
        updates
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Undo / Redo
    // ─────────────────────────────────────────────────────────────────────────

    /// Undo the last edit; `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<Vec<LineUpdate>> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(self.buffer.text());
        let delta = self.buffer.set_text(&previous);
        let caret = self.caret;
        Some(self.after_change(delta, caret))
    }

    /// Redo the last undone edit; `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<Vec<LineUpdate>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(self.buffer.text());
        let delta = self.buffer.set_text(&next);
        let caret = self.caret;
        Some(self.after_change(delta, caret))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Saving
    // ─────────────────────────────────────────────────────────────────────────

    /// Save to the document's path.
    ///
    /// # Errors
    ///
    /// `Error::Application` if the document has no path yet, or the
    /// `Error::FileWrite` from the write.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| Error::Application("Document has no file path".to_string()))?;
        let text = self.buffer.text();
        write_file(&path, &text)?;
        self.saved_text = text;
        Ok(())
    }

    /// Save to a new path, which becomes the document's path once the
    /// write succeeds.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        let text = self.buffer.text();
        write_file(path, &text)?;
        self.path = Some(path.to_path_buf());
        self.saved_text = text;
        Ok(())
    }

    /// Treat the current text as saved.
    pub fn mark_saved(&mut self) {
        self.saved_text = self.buffer.text();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::StyleTag;
    use tempfile::TempDir;

    fn first_tag(document: &Document, line: usize) -> Option<StyleTag> {
        document.spans(line)?.first().map(|s| s.tag)
    }

    #[test]
    fn test_new_document() {
        let document = Document::new();
        assert_eq!(document.title(), "Untitled");
        assert!(!document.is_modified());
        assert!(!document.can_undo());
        assert!(document.highlighter().is_consistent());
    }

    #[test]
    fn test_typing_updates_highlighting() {
        let mut document = Document::from_text("title");
        let updates = document.insert(0, "# ");

        assert_eq!(updates.len(), 1);
        assert_eq!(first_tag(&document, 0), Some(StyleTag::Heading1));
        assert_eq!(document.caret(), 2);
        assert!(document.is_modified());
        assert_eq!(document.title(), "Untitled*");
    }

    #[test]
    fn test_inserting_fence_cascades() {
        let mut document = Document::from_text("a\nb\nc");
        document.insert(0, "```\n");

        assert_eq!(document.buffer().line_count(), 4);
        for line in 0..4 {
            assert_eq!(first_tag(&document, line), Some(StyleTag::FencedCodeBlock));
        }
        assert!(document.highlighter().is_consistent());
    }

    #[test]
    fn test_caret_move_replaces_bracket_match() {
        let mut document = Document::from_text("(a(b)c)");
        assert_eq!(
            document.set_caret(7),
            Some(DelimiterMatch {
                anchor: 6,
                partner: 0
            })
        );
        assert_eq!(document.set_caret(2), None);
        assert_eq!(document.bracket_match(), None);
    }

    #[test]
    fn test_bracket_matching_can_be_disabled() {
        let mut document = Document::from_text("()");
        let settings = Settings {
            bracket_matching: false,
            ..Settings::default()
        };
        document.apply_settings(&settings);
        assert_eq!(document.set_caret(1), None);
    }

    #[test]
    fn test_apply_format() {
        let mut document = Document::from_text("Hello world");
        document.apply_format(FormatCommand::Bold, (0, 5));

        assert_eq!(document.text(), "**Hello** world");
        assert_eq!(document.caret(), 8);
        assert_eq!(first_tag(&document, 0), Some(StyleTag::Bold));
    }

    #[test]
    fn test_undo_redo() {
        let mut document = Document::from_text("a");
        document.insert(1, "b");
        document.insert(2, "c");
        assert_eq!(document.text(), "abc");

        document.undo().unwrap();
        assert_eq!(document.text(), "ab");
        document.undo().unwrap();
        assert_eq!(document.text(), "a");
        assert!(document.undo().is_none());
        assert!(!document.is_modified());

        document.redo().unwrap();
        assert_eq!(document.text(), "ab");

        // A new edit clears the redo history
        document.insert(0, "x");
        assert!(!document.can_redo());
    }

    #[test]
    fn test_undo_restores_highlighting() {
        let mut document = Document::from_text("x\ny");
        document.insert(0, "```\n");
        document.undo().unwrap();

        assert_eq!(first_tag(&document, 0), Some(StyleTag::PlainText));
        assert_eq!(first_tag(&document, 1), Some(StyleTag::PlainText));
        assert!(document.highlighter().is_consistent());
    }

    #[test]
    fn test_undo_history_is_bounded() {
        let mut document = Document::new();
        for i in 0..(MAX_UNDO_SIZE + 20) {
            document.insert(i, "x");
        }
        let mut undone = 0;
        while document.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, MAX_UNDO_SIZE);
    }

    #[test]
    fn test_noop_edit_is_not_recorded() {
        let mut document = Document::from_text("same");
        assert!(document.set_text("same").is_empty());
        assert!(!document.can_undo());
    }

    #[test]
    fn test_save_requires_path() {
        let mut document = Document::from_text("text");
        assert!(matches!(document.save(), Err(Error::Application(_))));
    }

    #[test]
    fn test_save_as_and_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.md");

        let mut document = Document::from_text("# Draft");
        document.insert(7, "\nbody");
        document.save_as(&path).unwrap();
        assert!(!document.is_modified());
        assert_eq!(document.title(), "draft.md");

        let reopened = Document::open(&path).unwrap();
        assert_eq!(reopened.text(), "# Draft\nbody");
        assert_eq!(reopened.path(), Some(path.as_path()));
        assert_eq!(first_tag(&reopened, 0), Some(StyleTag::Heading1));
    }

    #[test]
    fn test_failed_save_as_keeps_previous_path() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("missing").join("bad.md");

        let mut document = Document::from_text("text");
        document.save_as(&good).unwrap();
        document.insert(4, " more");

        assert!(document.save_as(&bad).is_err());
        assert_eq!(document.path(), Some(good.as_path()));
        assert!(document.is_modified());
        assert_eq!(document.title(), "good.md*");
    }

    #[test]
    fn test_mark_saved_clears_modified() {
        let mut document = Document::from_text("text");
        document.insert(0, "new ");
        assert!(document.is_modified());
        assert_eq!(document.title(), "Untitled*");

        document.mark_saved();
        assert!(!document.is_modified());
        assert_eq!(document.title(), "Untitled");
    }

    #[test]
    fn test_crlf_insert_places_caret_after_text() {
        let mut document = Document::from_text("XYZ");
        document.insert(0, "a\r\nb");
        assert_eq!(document.text(), "a\nbXYZ");
        assert_eq!(document.caret(), 3);

        document.replace(4..6, "1\r\n2\r\n");
        assert_eq!(document.text(), "a\nbX1\n2\n");
        assert_eq!(document.caret(), 8);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Document::open(&dir.path().join("nope.md"));
        assert!(matches!(result, Err(Error::FileRead { .. })));
    }
}
