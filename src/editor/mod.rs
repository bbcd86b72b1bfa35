//! Editor module for inkpad
//!
//! The text buffer, delimiter matching, formatting commands and the
//! document session that ties them to the highlighter.

mod brackets;
mod buffer;
mod document;
mod formatting;

pub use brackets::{find_match, DelimiterKind, DelimiterMatch, DELIMITER_PAIRS};
pub use buffer::{EditDelta, TextBuffer};
pub use document::Document;
pub use formatting::{format_edit, FormatCommand, FormatEdit};
