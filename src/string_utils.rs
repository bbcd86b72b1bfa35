//! UTF-8 offset helpers
//!
//! Highlight spans, carets and buffer edits are all expressed as byte offsets.
//! Hosts that count characters (or hand over an offset that may land inside a
//! multi-byte character) go through these helpers instead of slicing directly.

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundaries
// ─────────────────────────────────────────────────────────────────────────────

/// Largest char boundary `<= index`, clamped to the string length.
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= index`, clamped to the string length.
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// The character ending exactly at byte offset `end`, with its start offset.
///
/// Returns `None` when `end` is zero, past the end, or not a char boundary.
pub fn char_before(s: &str, end: usize) -> Option<(usize, char)> {
    if end == 0 || end > s.len() || !s.is_char_boundary(end) {
        return None;
    }
    s[..end].char_indices().next_back()
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Byte offset of the `char_index`-th character (string length past the end).
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(i, _)| i)
}

/// Number of characters before `byte_index` (floored to a boundary).
pub fn byte_index_to_char_index(s: &str, byte_index: usize) -> usize {
    let byte_index = floor_char_boundary(s, byte_index);
    s[..byte_index].chars().count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
