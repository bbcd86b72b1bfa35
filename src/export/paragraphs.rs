//! Paragraph model for document writers
//!
//! A deliberately simple line-by-line classifier that turns Markdown into
//! paragraphs of styled runs for DOCX/PDF style writers. It shares token
//! syntax with the highlighter (`# ` headings, `- `/`* ` bullets, `**bold**`,
//! `*italic*`, `` `code` ``, `[text](url)`) but none of its code.

use std::sync::OnceLock;

use log::{debug, error};
use regex::{Captures, Regex};

/// Numbered list item prefix
const NUMBERED_PATTERN: &str = r"^\d+\.\s";

/// Inline tokens in priority order: bold, italic, code, link
const INLINE_PATTERN: &str = r"\*\*(.*?)\*\*|\*(.*?)\*|`(.*?)`|\[(.*?)\]\(.*?\)";

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Block kind of an exported paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// Document title, always the first paragraph
    Title,
    /// Heading level 1 to 4
    Heading(u8),
    Bullet,
    Numbered,
    Body,
    /// Blank source line
    Empty,
}

/// A piece of paragraph text with uniform character formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Concatenated run text without formatting.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Paragraphs of one exported document, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportDocument {
    pub paragraphs: Vec<Paragraph>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

struct Patterns {
    numbered: Regex,
    inline: Regex,
}

fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            let compiled = Regex::new(NUMBERED_PATTERN).and_then(|numbered| {
                Regex::new(INLINE_PATTERN).map(|inline| Patterns { numbered, inline })
            });
            match compiled {
                Ok(patterns) => Some(patterns),
                Err(e) => {
                    error!("Failed to compile export patterns: {}", e);
                    None
                }
            }
        })
        .as_ref()
}

/// Classify every line of `markdown`, preceded by a title paragraph.
pub fn classify_document(markdown: &str, title: &str) -> ExportDocument {
    let mut paragraphs = vec![Paragraph {
        kind: ParagraphKind::Title,
        runs: vec![TextRun::plain(title)],
    }];
    paragraphs.extend(markdown.lines().map(classify_line));

    debug!("Classified {} export paragraphs", paragraphs.len());
    ExportDocument { paragraphs }
}

/// Classify a single source line.
pub fn classify_line(line: &str) -> Paragraph {
    for level in 1..=4u8 {
        let marker = "#".repeat(level as usize) + " ";
        if let Some(rest) = line.strip_prefix(marker.as_str()) {
            return paragraph(ParagraphKind::Heading(level), rest);
        }
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return paragraph(ParagraphKind::Bullet, rest);
    }

    if let Some(patterns) = patterns() {
        if let Some(prefix) = patterns.numbered.find(line) {
            return paragraph(ParagraphKind::Numbered, &line[prefix.end()..]);
        }
    }

    if line.trim().is_empty() {
        return Paragraph {
            kind: ParagraphKind::Empty,
            runs: Vec::new(),
        };
    }

    paragraph(ParagraphKind::Body, line)
}

fn paragraph(kind: ParagraphKind, text: &str) -> Paragraph {
    Paragraph {
        kind,
        runs: inline_runs(text),
    }
}

/// Split text into runs at inline tokens, dropping the delimiters.
pub fn inline_runs(text: &str) -> Vec<TextRun> {
    let Some(patterns) = patterns() else {
        return vec![TextRun::plain(text)];
    };

    let mut runs = Vec::new();
    let mut last = 0;

    for caps in patterns.inline.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_run(&mut runs, TextRun::plain(&text[last..whole.start()]));
        push_run(&mut runs, token_run(&caps));
        last = whole.end();
    }
    push_run(&mut runs, TextRun::plain(&text[last..]));

    runs
}

fn token_run(caps: &Captures<'_>) -> TextRun {
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

    if let Some(text) = group(1) {
        TextRun {
            text,
            bold: true,
            ..TextRun::default()
        }
    } else if let Some(text) = group(2) {
        TextRun {
            text,
            italic: true,
            ..TextRun::default()
        }
    } else if let Some(text) = group(3) {
        TextRun {
            text,
            code: true,
            ..TextRun::default()
        }
    } else {
        TextRun::plain(group(4).unwrap_or_default())
    }
}

/// Append a run, skipping empty text and merging with an identically
/// formatted predecessor.
fn push_run(runs: &mut Vec<TextRun>, run: TextRun) {
    if run.text.is_empty() {
        return;
    }
    if let Some(prev) = runs.last_mut() {
        if prev.bold == run.bold && prev.italic == run.italic && prev.code == run.code {
            prev.text.push_str(&run.text);
            return;
        }
    }
    runs.push(run);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_comes_first() {
        let document = classify_document("text", "Report");
        assert_eq!(document.paragraphs.len(), 2);
        assert_eq!(document.paragraphs[0].kind, ParagraphKind::Title);
        assert_eq!(document.paragraphs[0].text(), "Report");
    }

    #[test]
    fn test_headings() {
        assert_eq!(classify_line("# One").kind, ParagraphKind::Heading(1));
        assert_eq!(classify_line("#### Four").kind, ParagraphKind::Heading(4));
        assert_eq!(classify_line("## Two").text(), "Two");
        // Level five and missing space are body text
        assert_eq!(classify_line("##### Five").kind, ParagraphKind::Body);
        assert_eq!(classify_line("#tag").kind, ParagraphKind::Body);
    }

    #[test]
    fn test_lists() {
        let bullet = classify_line("- milk");
        assert_eq!(bullet.kind, ParagraphKind::Bullet);
        assert_eq!(bullet.text(), "milk");
        assert_eq!(classify_line("* eggs").kind, ParagraphKind::Bullet);

        let numbered = classify_line("12. twelfth");
        assert_eq!(numbered.kind, ParagraphKind::Numbered);
        assert_eq!(numbered.text(), "twelfth");
        assert_eq!(classify_line("1.5 apples").kind, ParagraphKind::Body);
    }

    #[test]
    fn test_empty_lines() {
        let document = classify_document("a\n\n   \nb", "t");
        let kinds: Vec<_> = document.paragraphs.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParagraphKind::Title,
                ParagraphKind::Body,
                ParagraphKind::Empty,
                ParagraphKind::Empty,
                ParagraphKind::Body,
            ]
        );
        assert!(document.paragraphs[2].runs.is_empty());
    }

    #[test]
    fn test_inline_runs() {
        let runs = inline_runs("Some **bold** and *italic* with `code`.");
        assert_eq!(
            runs,
            vec![
                TextRun::plain("Some "),
                TextRun {
                    text: "bold".into(),
                    bold: true,
                    ..TextRun::default()
                },
                TextRun::plain(" and "),
                TextRun {
                    text: "italic".into(),
                    italic: true,
                    ..TextRun::default()
                },
                TextRun::plain(" with "),
                TextRun {
                    text: "code".into(),
                    code: true,
                    ..TextRun::default()
                },
                TextRun::plain("."),
            ]
        );
    }

    #[test]
    fn test_link_keeps_text_only() {
        let runs = inline_runs("see [the docs](https://example.com) now");
        assert_eq!(runs, vec![TextRun::plain("see the docs now")]);
    }

    #[test]
    fn test_inline_in_list_item() {
        let item = classify_line("- buy **milk**");
        assert_eq!(item.kind, ParagraphKind::Bullet);
        assert_eq!(item.runs.len(), 2);
        assert!(item.runs[1].bold);
    }

    #[test]
    fn test_unclosed_delimiter_stays_literal() {
        assert_eq!(inline_runs("a `b"), vec![TextRun::plain("a `b")]);
    }
}
