//! Dark palette
//!
//! The default editor look: light grey text on a near-black background, with
//! headings in blue and fenced code on a slightly raised panel.

use super::{HighlightPalette, PageColors, Rgb, SpanFormat};

const FOREGROUND: Rgb = Rgb::new(0xD4, 0xD4, 0xD4);
const BACKGROUND: Rgb = Rgb::new(0x1E, 0x1E, 0x1E);
const HEADING: Rgb = Rgb::new(0x56, 0x9C, 0xD6);
const BOLD: Rgb = Rgb::new(0xD1, 0x9A, 0x66);
const ITALIC: Rgb = Rgb::new(0xB5, 0xCE, 0xA8);
const LIST_MARKER: Rgb = Rgb::new(0xCE, 0x91, 0x78);
const LINK: Rgb = Rgb::new(0x4E, 0xC9, 0xB0);
const CODE: Rgb = Rgb::new(0xDC, 0xDC, 0xAA);
const INLINE_CODE_BG: Rgb = Rgb::new(0x26, 0x26, 0x26);
const FENCE_BG: Rgb = Rgb::new(0x23, 0x27, 0x2E);
const QUOTE: Rgb = Rgb::new(0x6A, 0x99, 0x55);
const BRACKET_MATCH: Rgb = Rgb::new(0x39, 0xC5, 0xBB);

/// Build the dark palette.
pub fn palette() -> HighlightPalette {
    let heading = SpanFormat::plain(HEADING).bold();

    HighlightPalette {
        is_dark: true,
        background: BACKGROUND,
        headings: [
            heading.sized(20.0),
            heading.sized(16.0),
            heading.sized(14.0),
            heading.sized(12.0),
        ],
        bold: SpanFormat::plain(BOLD).bold(),
        italic: SpanFormat::plain(ITALIC).italic(),
        list_marker: SpanFormat::plain(LIST_MARKER).bold(),
        link: SpanFormat::plain(LINK).underline(),
        inline_code: SpanFormat::plain(CODE).monospace().on(INLINE_CODE_BG),
        fenced_code: SpanFormat::plain(CODE).monospace().on(FENCE_BG),
        block_quote: SpanFormat::plain(QUOTE).italic(),
        plain: SpanFormat::plain(FOREGROUND),
        bracket_match: BRACKET_MATCH,
        current_line: Rgb::new(0x2A, 0x2D, 0x2E),
        page: PageColors {
            background: BACKGROUND,
            text: FOREGROUND,
            heading: HEADING,
            border: Rgb::new(60, 60, 60),
            link: LINK,
            blockquote_text: QUOTE,
            blockquote_border: Rgb::new(80, 80, 80),
            code_bg: INLINE_CODE_BG,
            code_text: CODE,
            code_block_bg: FENCE_BG,
            code_block_border: Rgb::new(55, 60, 68),
        },
    }
}
