//! Code block highlighting for the preview
//!
//! Implements the renderer's `CodeBlockHighlighter` hook with syntect. Fence
//! language tags are resolved through an alias table (`py`, `js`, `sh`, ...)
//! before falling back to syntect's own name lookup.
//!
//! # Example
//! ```ignore
//! use inkpad::preview::{CodeBlockHighlighter, SyntectHighlighter};
//!
//! let highlighter = SyntectHighlighter::new();
//! let html = highlighter.highlight("fn main() {}", "rust");
//! assert!(html.is_some());
//! ```

use log::{debug, warn};
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::render::CodeBlockHighlighter;
use crate::config::{Settings, Theme};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default dark theme name from syntect's built-in themes
pub const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

/// Default light theme name from syntect's built-in themes
pub const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";

// ─────────────────────────────────────────────────────────────────────────────
// Syntect Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Syntax highlighter holding the loaded syntect sets.
///
/// Loading the sets is relatively expensive; build one per renderer and
/// reuse it.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    /// Requested theme name
    theme_name: String,
    /// Used when `theme_name` is not a known theme
    fallback_theme: &'static str,
}

impl std::fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("theme_name", &self.theme_name)
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .finish()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    /// Highlighter with the default dark theme.
    pub fn new() -> Self {
        Self::for_theme(Theme::Dark, "")
    }

    /// Highlighter for an editor theme; a non-empty `syntax_theme` overrides
    /// the theme's default syntect theme.
    pub fn for_theme(theme: Theme, syntax_theme: &str) -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );

        let fallback_theme = if theme.is_dark() {
            DEFAULT_DARK_THEME
        } else {
            DEFAULT_LIGHT_THEME
        };
        let theme_name = if syntax_theme.is_empty() {
            fallback_theme.to_string()
        } else {
            syntax_theme.to_string()
        };
        if !theme_set.themes.contains_key(&theme_name) {
            warn!(
                "Unknown syntax theme '{}', using '{}'",
                theme_name, fallback_theme
            );
        }

        Self {
            syntax_set,
            theme_set,
            theme_name,
            fallback_theme,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::for_theme(settings.theme, &settings.syntax_theme)
    }

    /// Names of the bundled syntect themes.
    pub fn available_themes(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(String::as_str).collect()
    }

    fn theme(&self) -> Option<&SyntectTheme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.get(self.fallback_theme))
    }

    /// Find a syntax definition for a fence language tag.
    fn find_syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lang_lower = language.to_lowercase();
        let extension = match lang_lower.as_str() {
            "rust" | "rs" => "rs",
            "python" | "py" => "py",
            "javascript" | "js" => "js",
            "typescript" | "ts" => "ts",
            "c" => "c",
            "cpp" | "c++" | "cxx" => "cpp",
            "csharp" | "c#" | "cs" => "cs",
            "java" => "java",
            "go" | "golang" => "go",
            "ruby" | "rb" => "rb",
            "php" => "php",
            "html" | "htm" => "html",
            "css" => "css",
            "json" => "json",
            "yaml" | "yml" => "yaml",
            "xml" => "xml",
            "markdown" | "md" => "md",
            "sql" => "sql",
            "shell" | "sh" | "bash" | "zsh" => "sh",
            "makefile" | "make" => "Makefile",
            "lua" => "lua",
            "perl" | "pl" => "pl",
            "r" => "r",
            "haskell" | "hs" => "hs",
            "diff" | "patch" => "diff",
            other => other,
        };

        self.syntax_set
            .find_syntax_by_extension(extension)
            .or_else(|| self.syntax_set.find_syntax_by_name(language))
            .or_else(|| {
                self.syntax_set
                    .syntaxes()
                    .iter()
                    .find(|syntax| syntax.name.to_lowercase() == lang_lower)
            })
    }
}

impl CodeBlockHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Option<String> {
        let syntax = self.find_syntax_for_language(language)?;
        let theme = self.theme()?;

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(html) => Some(html),
            Err(e) => {
                warn!("Failed to highlight {} block: {}", language, e);
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
