//! Highlight palettes for inkpad
//!
//! Maps each `StyleTag` to a `SpanFormat` the host can paint with, and holds
//! the page colors used by the HTML preview and export. Palettes are plain
//! data; the highlighter itself never sees colors.
//!
//! # Theme Files
//!
//! - `dark.rs` - Dark palette (the editor's default look)
//! - `light.rs` - Light palette
//!
//! # Usage
//!
//! ```ignore
//! use inkpad::config::Theme;
//! use inkpad::highlight::StyleTag;
//! use inkpad::theme::HighlightPalette;
//!
//! let palette = HighlightPalette::from_theme(Theme::Dark);
//! let format = palette.format_for(StyleTag::Heading1);
//! assert!(format.bold);
//! ```

pub mod dark;
pub mod light;

use std::fmt;

use crate::config::{Settings, Theme};
use crate::highlight::StyleTag;

/// Editor font size the palettes' heading sizes are designed around
pub const BASE_FONT_SIZE: f32 = 13.0;

/// Heading point sizes relative to the editor font size, levels 1 to 4
const HEADING_SCALE: [f32; 4] = [20.0 / 13.0, 16.0 / 13.0, 14.0 / 13.0, 12.0 / 13.0];

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS hex notation, e.g. `#1e1e1e`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Span Format
// ─────────────────────────────────────────────────────────────────────────────

/// How a run with a given tag is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanFormat {
    pub foreground: Rgb,
    pub background: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub monospace: bool,
    /// Absolute font size in points; `None` keeps the editor size
    pub point_size: Option<f32>,
}

impl SpanFormat {
    pub const fn plain(foreground: Rgb) -> Self {
        Self {
            foreground,
            background: None,
            bold: false,
            italic: false,
            underline: false,
            monospace: false,
            point_size: None,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }

    pub const fn on(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }

    pub fn sized(mut self, points: f32) -> Self {
        self.point_size = Some(points);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for the rendered HTML page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageColors {
    pub background: Rgb,
    pub text: Rgb,
    pub heading: Rgb,
    pub border: Rgb,
    pub link: Rgb,
    pub blockquote_text: Rgb,
    pub blockquote_border: Rgb,
    pub code_bg: Rgb,
    pub code_text: Rgb,
    pub code_block_bg: Rgb,
    pub code_block_border: Rgb,
}

// ─────────────────────────────────────────────────────────────────────────────
// Highlight Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Formats for every style tag plus the editor and page colors.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightPalette {
    pub is_dark: bool,
    /// Editor background
    pub background: Rgb,
    /// Heading levels 1 to 4
    pub headings: [SpanFormat; 4],
    pub bold: SpanFormat,
    pub italic: SpanFormat,
    pub list_marker: SpanFormat,
    pub link: SpanFormat,
    pub inline_code: SpanFormat,
    pub fenced_code: SpanFormat,
    pub block_quote: SpanFormat,
    pub plain: SpanFormat,
    /// Background of the two matched delimiter cells
    pub bracket_match: Rgb,
    pub current_line: Rgb,
    pub page: PageColors,
}

impl HighlightPalette {
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => dark::palette(),
            Theme::Light => light::palette(),
        }
    }

    /// Palette for the configured theme, sized for the configured font.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_theme(settings.theme).with_font_size(settings.font_size)
    }

    /// Set the plain text size and scale the headings from it.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.plain.point_size = Some(font_size);
        for (heading, scale) in self.headings.iter_mut().zip(HEADING_SCALE) {
            heading.point_size = Some(font_size * scale);
        }
        self
    }

    /// Editor font size, if one was set.
    pub fn font_size(&self) -> Option<f32> {
        self.plain.point_size
    }

    /// Format for a resolved span's tag.
    pub fn format_for(&self, tag: StyleTag) -> &SpanFormat {
        match tag {
            StyleTag::Heading1 => &self.headings[0],
            StyleTag::Heading2 => &self.headings[1],
            StyleTag::Heading3 => &self.headings[2],
            StyleTag::Heading4 => &self.headings[3],
            StyleTag::Bold => &self.bold,
            StyleTag::Italic => &self.italic,
            StyleTag::ListMarker => &self.list_marker,
            StyleTag::Link => &self.link,
            StyleTag::InlineCode => &self.inline_code,
            StyleTag::FencedCodeBlock => &self.fenced_code,
            StyleTag::BlockQuote => &self.block_quote,
            StyleTag::PlainText => &self.plain,
        }
    }
}

impl Default for HighlightPalette {
    fn default() -> Self {
        dark::palette()
    }
}
