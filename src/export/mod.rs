//! Export module for inkpad
//!
//! - `html` - standalone HTML pages styled from the highlight palette
//! - `paragraphs` - the line-based paragraph model consumed by document writers

pub mod html;
pub mod paragraphs;

pub use html::{export_html, html_document};
pub use paragraphs::{classify_document, ExportDocument, Paragraph, ParagraphKind, TextRun};
