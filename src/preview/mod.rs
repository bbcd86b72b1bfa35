//! Preview module for inkpad
//!
//! Renders the document to HTML with comrak, with fenced code blocks
//! highlighted by syntect through the `CodeBlockHighlighter` hook.

mod render;
mod syntax;

pub use render::{CodeBlockHighlighter, MarkdownRenderer, RenderOptions};
pub use syntax::{SyntectHighlighter, DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};
