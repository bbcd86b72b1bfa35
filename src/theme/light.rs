//! Light palette

use super::{HighlightPalette, PageColors, Rgb, SpanFormat};

const FOREGROUND: Rgb = Rgb::new(30, 30, 30);
const BACKGROUND: Rgb = Rgb::new(255, 255, 255);
const HEADING: Rgb = Rgb::new(0, 100, 180);
const LINK: Rgb = Rgb::new(0, 100, 180);
const CODE: Rgb = Rgb::new(80, 80, 80);
const CODE_BG: Rgb = Rgb::new(245, 245, 245);
const FENCE_BG: Rgb = Rgb::new(233, 236, 239);
const QUOTE: Rgb = Rgb::new(100, 100, 100);

/// Build the light palette.
pub fn palette() -> HighlightPalette {
    let heading = SpanFormat::plain(HEADING).bold();

    HighlightPalette {
        is_dark: false,
        background: BACKGROUND,
        headings: [
            heading.sized(20.0),
            heading.sized(16.0),
            heading.sized(14.0),
            heading.sized(12.0),
        ],
        bold: SpanFormat::plain(Rgb::new(175, 0, 175)).bold(),
        italic: SpanFormat::plain(Rgb::new(0, 128, 0)).italic(),
        list_marker: SpanFormat::plain(Rgb::new(100, 100, 100)).bold(),
        link: SpanFormat::plain(LINK).underline(),
        inline_code: SpanFormat::plain(CODE).monospace().on(CODE_BG),
        fenced_code: SpanFormat::plain(CODE).monospace().on(FENCE_BG),
        block_quote: SpanFormat::plain(QUOTE).italic(),
        plain: SpanFormat::plain(FOREGROUND),
        bracket_match: Rgb::new(150, 220, 215),
        current_line: Rgb::new(245, 248, 252),
        page: PageColors {
            background: BACKGROUND,
            text: FOREGROUND,
            heading: HEADING,
            border: Rgb::new(200, 200, 200),
            link: LINK,
            blockquote_text: QUOTE,
            blockquote_border: Rgb::new(200, 200, 200),
            code_bg: CODE_BG,
            code_text: CODE,
            code_block_bg: FENCE_BG,
            code_block_border: Rgb::new(195, 202, 210),
        },
    }
}
