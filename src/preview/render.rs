//! Markdown to HTML rendering using comrak
//!
//! Parses with comrak's GFM extensions and renders an HTML fragment. Fenced
//! code blocks are offered to an optional [`CodeBlockHighlighter`]; when the
//! hook declines (no hook, empty or unknown language) comrak's own escaped
//! `<pre><code>` output is kept.

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{format_html, parse_document, Arena, Options};
use log::{debug, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::export::html_document;
use crate::theme::HighlightPalette;

use super::syntax::SyntectHighlighter;

// ─────────────────────────────────────────────────────────────────────────────
// Code Block Hook
// ─────────────────────────────────────────────────────────────────────────────

/// Turns the body of a fenced code block into highlighted HTML.
pub trait CodeBlockHighlighter {
    /// Highlight `code` written in `language` (the first word of the fence
    /// info string). Return `None` to fall back to plain escaped output.
    fn highlight(&self, code: &str, language: &str) -> Option<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Rendering options passed through to comrak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// GFM strikethrough (`~~text~~`)
    pub strikethrough: bool,
    /// GFM tables
    pub tables: bool,
    /// Bare URL autolinking
    pub autolink: bool,
    /// Task list items (`- [ ]`)
    pub tasklist: bool,
    pub footnotes: bool,
    /// Curly quotes and dashes
    pub smart_punctuation: bool,
    /// Pass raw HTML through. Highlighted code blocks need this.
    pub allow_raw_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            tables: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            smart_punctuation: true,
            allow_raw_html: true,
        }
    }
}

impl RenderOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.footnotes = self.footnotes;

        options.parse.smart = self.smart_punctuation;

        options.render.unsafe_ = self.allow_raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown renderer with an optional code block hook.
pub struct MarkdownRenderer {
    options: RenderOptions,
    highlighter: Option<Box<dyn CodeBlockHighlighter>>,
}

impl std::fmt::Debug for MarkdownRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownRenderer")
            .field("options", &self.options)
            .field("highlighter", &self.highlighter.is_some())
            .finish()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Renderer with default options and no code highlighting.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            highlighter: None,
        }
    }

    /// Install a code block hook, replacing any previous one.
    pub fn with_highlighter(mut self, highlighter: Box<dyn CodeBlockHighlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Renderer configured from settings: syntect highlighting when
    /// `preview_code_highlighting` is on.
    pub fn from_settings(settings: &Settings) -> Self {
        let renderer = Self::new();
        if settings.preview_code_highlighting {
            renderer.with_highlighter(Box::new(SyntectHighlighter::from_settings(settings)))
        } else {
            renderer
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markdown to an HTML fragment.
    ///
    /// # Errors
    ///
    /// `Error::Render` if comrak fails to write the output.
    pub fn render(&self, markdown: &str) -> Result<String> {
        let arena = Arena::new();
        let comrak_options = self.options.to_comrak_options();
        let root = parse_document(&arena, markdown, &comrak_options);

        if self.options.allow_raw_html {
            if let Some(highlighter) = &self.highlighter {
                let count = highlight_code_blocks(root, highlighter.as_ref());
                debug!("Highlighted {} code blocks", count);
            }
        }

        let mut output = Vec::new();
        format_html(root, &comrak_options, &mut output)
            .map_err(|e| Error::Render(format!("failed to write HTML: {}", e)))?;

        String::from_utf8(output).map_err(|e| Error::Render(format!("invalid UTF-8: {}", e)))
    }

    /// Render markdown into a standalone HTML page styled from `palette`.
    pub fn render_page(
        &self,
        markdown: &str,
        title: &str,
        palette: &HighlightPalette,
    ) -> Result<String> {
        let body = self.render(markdown)?;
        Ok(html_document(&body, title, palette))
    }
}

/// Replace code blocks the hook accepts with raw HTML blocks.
fn highlight_code_blocks<'a>(
    root: &'a AstNode<'a>,
    highlighter: &dyn CodeBlockHighlighter,
) -> usize {
    let mut count = 0;

    for node in root.descendants() {
        let html = {
            let data = node.data.borrow();
            let NodeValue::CodeBlock(block) = &data.value else {
                continue;
            };
            let language = block.info.split_whitespace().next().unwrap_or("");
            match highlighter.highlight(&block.literal, language) {
                Some(html) => html,
                None => {
                    if !language.is_empty() {
                        warn!("No highlighting for code block language '{}'", language);
                    }
                    continue;
                }
            }
        };

        node.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: html,
        });
        count += 1;
    }

    count
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
