//! inkpad - Main Entry Point
//!
//! Command line front end over the editing core: prints highlight spans,
//! delimiter matches and the export paragraph model, and renders documents
//! to standalone HTML pages.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use inkpad::config::load_config_or_default;
use inkpad::editor::{find_match, Document};
use inkpad::error::Result;
use inkpad::export::{classify_document, export_html, ParagraphKind};
use inkpad::files::read_file;
use inkpad::preview::MarkdownRenderer;
use inkpad::theme::HighlightPalette;

/// Application name constant.
const APP_NAME: &str = "inkpad";

/// Markdown highlighting, delimiter matching and preview rendering
#[derive(Parser, Debug)]
#[command(name = "inkpad")]
#[command(about = "Markdown editing core: highlight, match, render", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the styled spans of every line
    Highlight {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the delimiter matched from the character before OFFSET
    Match {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Caret byte offset
        #[arg(value_name = "OFFSET")]
        offset: usize,
    },
    /// Render the document to a standalone HTML page
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Page title (default: file name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the paragraph model used by document writers
    Paragraphs {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Starting {}", APP_NAME);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = load_config_or_default(args.config.as_deref());

    match args.command {
        Command::Highlight { file } => {
            let mut document = Document::open(&file)?;
            document.apply_settings(&settings);
            let buffer = document.buffer();
            for index in 0..buffer.line_count() {
                let line = buffer.line(index).unwrap_or_default();
                let spans = document.spans(index).unwrap_or_default();
                let rendered: Vec<String> = spans
                    .iter()
                    .map(|span| {
                        format!(
                            "{}[{}..{}]",
                            span.tag.name(),
                            span.start,
                            span.end()
                        )
                    })
                    .collect();
                println!("{:>4} | {} | {}", index + 1, rendered.join(" "), line);
            }
        }
        Command::Match { file, offset } => {
            let text = read_file(&file)?;
            match find_match(&text, offset) {
                Some(found) => println!("{} -> {}", found.anchor, found.partner),
                None => println!("no match"),
            }
        }
        Command::Render {
            file,
            output,
            title,
        } => {
            let markdown = read_file(&file)?;
            let title = title.unwrap_or_else(|| file_title(&file));
            let renderer = MarkdownRenderer::from_settings(&settings);
            let palette = HighlightPalette::from_settings(&settings);

            match output {
                Some(output) => export_html(&renderer, &markdown, &title, &palette, &output)?,
                None => print!("{}", renderer.render_page(&markdown, &title, &palette)?),
            }
        }
        Command::Paragraphs { file } => {
            let markdown = read_file(&file)?;
            let document = classify_document(&markdown, &file_title(&file));
            for paragraph in &document.paragraphs {
                let kind = match paragraph.kind {
                    ParagraphKind::Title => "title".to_string(),
                    ParagraphKind::Heading(level) => format!("h{}", level),
                    ParagraphKind::Bullet => "bullet".to_string(),
                    ParagraphKind::Numbered => "numbered".to_string(),
                    ParagraphKind::Body => "body".to_string(),
                    ParagraphKind::Empty => "empty".to_string(),
                };
                println!("{:<8} {}", kind, paragraph.text());
            }
        }
    }

    Ok(())
}

/// Page title from a file name, e.g. `notes` for `notes.md`.
fn file_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Document")
        .to_string()
}
