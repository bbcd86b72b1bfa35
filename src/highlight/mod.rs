//! Incremental Markdown highlighting for the raw editor pane
//!
//! This module classifies each line of a buffer into styled spans using an
//! ordered table of regex rules, carrying only the fenced-code state from one
//! line to the next.
//!
//! # Architecture
//!
//! - `rules.rs` - Style tags and the ordered rule table
//! - `classify.rs` - Single-line classification (`classify`)
//! - `incremental.rs` - Per-line state records and the dirty-line worklist
//!
//! # Example
//! ```ignore
//! use inkpad::highlight::{IncrementalHighlighter, LexState};
//!
//! let lines = vec!["# Title", "```rust", "let x = 1;", "```"];
//! let mut highlighter = IncrementalHighlighter::new();
//! highlighter.reset(lines.len());
//! let updates = highlighter.refresh(&lines);
//! assert_eq!(updates.len(), 4);
//! assert_eq!(highlighter.outgoing_state(1), Some(LexState::InFence));
//! ```

mod classify;
mod incremental;
mod rules;

pub use classify::{classify, LexState, LineHighlight, StyledSpan};
pub use incremental::{IncrementalHighlighter, LineSource, LineUpdate};
pub use rules::{HighlightRules, StyleTag};
