//! HTML page generation
//!
//! Wraps a rendered HTML fragment in a standalone page whose CSS comes from
//! the active highlight palette, so the preview and the exported file share
//! the editor's colors.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::files::write_file;
use crate::preview::MarkdownRenderer;
use crate::theme::HighlightPalette;

/// Title used when the caller passes an empty one
pub const DEFAULT_TITLE: &str = "Untitled";

// ─────────────────────────────────────────────────────────────────────────────
// Page Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Build a complete HTML document around `body`.
///
/// `body` is inserted as-is; `title` is escaped.
pub fn html_document(body: &str, title: &str, palette: &HighlightPalette) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="inkpad">
    <title>{title}</title>
    <style>
{base_css}
{theme_css}
    </style>
</head>
<body>
    <article class="inkpad-page">
{body}
    </article>
</body>
</html>
"#,
        title = html_escape(title),
        base_css = BASE_CSS,
        theme_css = theme_css(palette),
        body = body,
    )
}

/// Render `markdown` and write it as a standalone page to `output`.
///
/// # Errors
///
/// `Error::Render` from the renderer or `Error::FileWrite` from the write.
pub fn export_html(
    renderer: &MarkdownRenderer,
    markdown: &str,
    title: &str,
    palette: &HighlightPalette,
    output: &Path,
) -> Result<()> {
    let page = renderer.render_page(markdown, title, palette)?;
    write_file(output, &page)?;
    info!("Exported HTML to {}", output.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Layout and typography shared by both palettes.
const BASE_CSS: &str = r#"
*, *::before, *::after { box-sizing: border-box; }

body {
    margin: 0;
    font-family: -apple-system, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
}

.inkpad-page { max-width: 860px; margin: 0 auto; padding: 32px 24px; }

.inkpad-page h1, .inkpad-page h2, .inkpad-page h3, .inkpad-page h4 {
    margin: 24px 0 16px;
    font-weight: 600;
    line-height: 1.25;
}
.inkpad-page h1 { font-size: 2em; border-bottom: 1px solid; padding-bottom: 0.3em; }
.inkpad-page h2 { font-size: 1.5em; border-bottom: 1px solid; padding-bottom: 0.3em; }
.inkpad-page h3 { font-size: 1.25em; }
.inkpad-page h4 { font-size: 1em; }

.inkpad-page p, .inkpad-page ul, .inkpad-page ol, .inkpad-page table { margin: 0 0 16px; }
.inkpad-page ul, .inkpad-page ol { padding-left: 2em; }
.inkpad-page a { text-decoration: underline; }

.inkpad-page blockquote { margin: 0 0 16px; padding: 0 1em; border-left: 4px solid; font-style: italic; }

.inkpad-page code {
    font-family: 'JetBrains Mono', 'Fira Code', Consolas, monospace;
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
}
.inkpad-page pre { margin: 0 0 16px; padding: 16px; overflow: auto; border-radius: 6px; line-height: 1.45; }
.inkpad-page pre code { padding: 0; background: transparent; }

.inkpad-page table { border-collapse: collapse; width: 100%; }
.inkpad-page th, .inkpad-page td { padding: 6px 12px; border: 1px solid; }
.inkpad-page hr { height: 2px; margin: 24px 0; border: none; }
.inkpad-page img { max-width: 100%; }
"#;

/// Colors and text size for one palette.
fn theme_css(palette: &HighlightPalette) -> String {
    let colors = &palette.page;
    let font_size = palette
        .font_size()
        .map(|size| format!("body {{ font-size: {}pt; }}\n", size))
        .unwrap_or_default();

    let css = format!(
        r#"
:root {{ color-scheme: {color_scheme}; }}
body {{ background-color: {bg}; color: {text}; }}
.inkpad-page h1, .inkpad-page h2, .inkpad-page h3, .inkpad-page h4 {{ color: {heading}; }}
.inkpad-page h1, .inkpad-page h2 {{ border-bottom-color: {border}; }}
.inkpad-page a {{ color: {link}; }}
.inkpad-page blockquote {{ color: {blockquote_text}; border-left-color: {blockquote_border}; }}
.inkpad-page code {{ background-color: {code_bg}; color: {code_text}; }}
.inkpad-page pre {{ background-color: {code_block_bg}; border: 1px solid {code_block_border}; }}
.inkpad-page th, .inkpad-page td {{ border-color: {border}; }}
.inkpad-page hr {{ background-color: {border}; }}
"#,
        color_scheme = if palette.is_dark { "dark" } else { "light" },
        bg = colors.background.to_css(),
        text = colors.text.to_css(),
        heading = colors.heading.to_css(),
        border = colors.border.to_css(),
        link = colors.link.to_css(),
        blockquote_text = colors.blockquote_text.to_css(),
        blockquote_border = colors.blockquote_border.to_css(),
        code_bg = colors.code_bg.to_css(),
        code_text = colors.code_text.to_css(),
        code_block_bg = colors.code_block_bg.to_css(),
        code_block_border = colors.code_block_border.to_css(),
    );
    css + &font_size
}

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
