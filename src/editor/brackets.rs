//! Matching delimiter lookup for the caret
//!
//! The delimiter considered is the character just before the caret. Brackets
//! are matched with a depth counter; quote-like markers that open and close
//! with the same character take the nearest other occurrence, looking forward
//! first and then backward. There is no nesting awareness for those.
//!
//! All delimiters are ASCII, so the scans run over bytes. An ASCII byte never
//! occurs inside a multi-byte UTF-8 sequence, so every offset returned is a
//! char boundary.

use std::ops::Range;

use crate::string_utils::char_before;

// ─────────────────────────────────────────────────────────────────────────────
// Delimiter Table
// ─────────────────────────────────────────────────────────────────────────────

/// Opening character and its closing counterpart.
pub const DELIMITER_PAIRS: &[(u8, u8)] = &[
    (b'(', b')'),
    (b'[', b']'),
    (b'{', b'}'),
    (b'"', b'"'),
    (b'\'', b'\''),
    (b'`', b'`'),
    (b'*', b'*'),
    (b'_', b'_'),
];

/// How a delimiter character behaves when matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterKind {
    /// Opens and closes with the same character
    SelfMatching,
    Opening { close: u8 },
    Closing { open: u8 },
}

impl DelimiterKind {
    /// Classify a byte, or `None` if it is not a delimiter.
    pub fn of(byte: u8) -> Option<Self> {
        DELIMITER_PAIRS.iter().find_map(|&(open, close)| {
            if open == close && byte == open {
                Some(DelimiterKind::SelfMatching)
            } else if byte == open {
                Some(DelimiterKind::Opening { close })
            } else if byte == close {
                Some(DelimiterKind::Closing { open })
            } else {
                None
            }
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Match Result
// ─────────────────────────────────────────────────────────────────────────────

/// A delimiter before the caret and its counterpart, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterMatch {
    /// Offset of the delimiter just before the caret
    pub anchor: usize,
    /// Offset of its counterpart
    pub partner: usize,
}

impl DelimiterMatch {
    /// The two single-character regions to highlight.
    pub fn regions(&self) -> [Range<usize>; 2] {
        [
            self.anchor..self.anchor + 1,
            self.partner..self.partner + 1,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Find the counterpart of the delimiter immediately before `caret`.
///
/// Returns `None` when the caret is at 0, past the end or not on a char
/// boundary, when the preceding character is not a delimiter, or when no
/// counterpart exists.
pub fn find_match(text: &str, caret: usize) -> Option<DelimiterMatch> {
    let (anchor, ch) = char_before(text, caret)?;
    if !ch.is_ascii() {
        return None;
    }
    let delimiter = ch as u8;
    let bytes = text.as_bytes();

    let partner = match DelimiterKind::of(delimiter)? {
        DelimiterKind::SelfMatching => find_forward(bytes, caret, delimiter)
            .or_else(|| find_backward(bytes, anchor, delimiter)),
        DelimiterKind::Opening { close } => scan_forward(bytes, caret, delimiter, close),
        DelimiterKind::Closing { open } => scan_backward(bytes, anchor, delimiter, open),
    }?;

    Some(DelimiterMatch { anchor, partner })
}

/// First occurrence of `target` at or after `from`.
fn find_forward(bytes: &[u8], from: usize, target: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == target)
        .map(|i| from + i)
}

/// Last occurrence of `target` strictly before `before`.
fn find_backward(bytes: &[u8], before: usize, target: u8) -> Option<usize> {
    bytes.get(..before)?.iter().rposition(|&b| b == target)
}

/// Closer balancing an opener, scanning forward from `from` at depth 1.
fn scan_forward(bytes: &[u8], from: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 1usize;
    for (i, &b) in bytes.get(from..)?.iter().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(from + i);
            }
        }
    }
    None
}

/// Opener balancing a closer, scanning backward from just before `before`.
fn scan_backward(bytes: &[u8], before: usize, close: u8, open: u8) -> Option<usize> {
    let mut depth = 1usize;
    for (i, &b) in bytes.get(..before)?.iter().enumerate().rev() {
        if b == close {
            depth += 1;
        } else if b == open {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(text: &str, caret: usize) -> Option<usize> {
        find_match(text, caret).map(|m| m.partner)
    }

    #[test]
    fn test_closing_paren_finds_outer_opener() {
        let m = find_match("(a(b)c)", 7).unwrap();
        assert_eq!(m.anchor, 6);
        assert_eq!(m.partner, 0);
    }

    #[test]
    fn test_inner_pair() {
        assert_eq!(partner("(a(b)c)", 5), Some(2));
        assert_eq!(partner("(a(b)c)", 3), Some(4));
    }

    #[test]
    fn test_unclosed_opener_has_no_match() {
        assert_eq!(find_match("(a", 1), None);
        assert_eq!(find_match("a)", 2), None);
    }

    #[test]
    fn test_backtick_matches_forward_first() {
        let m = find_match("`code` more", 1).unwrap();
        assert_eq!(m.anchor, 0);
        assert_eq!(m.partner, 5);
    }

    #[test]
    fn test_self_matching_falls_back_to_backward() {
        // Caret after the closing quote; nothing further right
        assert_eq!(partner("say \"hi\"", 8), Some(4));
    }

    #[test]
    fn test_self_matching_prefers_nearest_forward() {
        // Nearest occurrence wins even though it is not the "real" partner
        assert_eq!(partner("*a* *b*", 3), Some(4));
    }

    #[test]
    fn test_mixed_brackets_are_independent() {
        assert_eq!(partner("[a(b]c)", 1), Some(4));
        assert_eq!(partner("{x{y}z}", 1), Some(6));
    }

    #[test]
    fn test_invalid_carets() {
        assert_eq!(find_match("(a)", 0), None);
        assert_eq!(find_match("(a)", 4), None);
        assert_eq!(find_match("", 0), None);
        // Inside a multi-byte character
        assert_eq!(find_match("é(x)", 1), None);
    }

    #[test]
    fn test_non_delimiter_before_caret() {
        assert_eq!(find_match("abc)", 2), None);
        assert_eq!(find_match("é)", 2), None);
    }

    #[test]
    fn test_multibyte_text_between_delimiters() {
        let text = "(på)";
        let m = find_match(text, 1).unwrap();
        assert_eq!(m.partner, 4);
        assert_eq!(&text[m.partner..m.partner + 1], ")");
    }

    #[test]
    fn test_regions() {
        let m = DelimiterMatch {
            anchor: 6,
            partner: 0,
        };
        assert_eq!(m.regions(), [6..7, 0..1]);
    }

    #[test]
    fn test_delimiter_kinds() {
        assert_eq!(DelimiterKind::of(b'_'), Some(DelimiterKind::SelfMatching));
        assert_eq!(
            DelimiterKind::of(b'['),
            Some(DelimiterKind::Opening { close: b']' })
        );
        assert_eq!(
            DelimiterKind::of(b'}'),
            Some(DelimiterKind::Closing { open: b'{' })
        );
        assert_eq!(DelimiterKind::of(b'<'), None);
    }
}
