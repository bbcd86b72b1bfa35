//! inkpad - Markdown editing core
//!
//! Incremental line-based Markdown highlighting and delimiter matching over an
//! editable text buffer, with a comrak preview renderer, HTML and paragraph
//! export, and file persistence with autosave.
//!
//! # Modules
//!
//! - `highlight` - per-line classification and the incremental worklist
//! - `editor` - text buffer, delimiter matching, formatting, document session
//! - `preview` - Markdown to HTML with syntect code blocks
//! - `export` - standalone HTML pages and the paragraph model
//! - `files` - reading, atomic writing and autosave
//! - `config` - user settings
//! - `theme` - highlight palettes

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod files;
pub mod highlight;
pub mod preview;
pub mod string_utils;
pub mod theme;
