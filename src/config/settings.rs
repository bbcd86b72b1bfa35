//! User settings for inkpad
//!
//! This module defines the `Settings` struct that holds the user-configurable
//! options of the editing core, with serde support for the JSON config file.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Color theme for highlighting and the preview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences read from `config.json`.
///
/// Every field has a default, so a partial or empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light or dark)
    pub theme: Theme,

    /// Base font size for the editor (in points)
    pub font_size: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Editor Behavior
    // ─────────────────────────────────────────────────────────────────────────
    /// Highlight the delimiter matching the one before the caret
    pub bracket_matching: bool,

    /// Whether to auto-save modified documents that have a path
    pub auto_save: bool,

    /// Auto-save interval in seconds
    pub auto_save_interval_secs: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────
    /// Highlight fenced code blocks in the preview
    pub preview_code_highlighting: bool,

    /// Syntax theme name; empty picks one matching `theme`
    pub syntax_theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_size: 13.0,
            bracket_matching: true,
            auto_save: true,
            auto_save_interval_secs: 10,
            preview_code_highlighting: true,
            syntax_theme: String::new(),
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Shortest auto-save interval in seconds.
    pub const MIN_AUTO_SAVE_SECS: u64 = 1;
    /// Longest auto-save interval in seconds.
    pub const MAX_AUTO_SAVE_SECS: u64 = 3600;

    /// Clamp values to valid ranges after loading a hand-edited file.
    pub fn sanitize(&mut self) {
        if !self.font_size.is_finite() {
            self.font_size = Settings::default().font_size;
        }
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.auto_save_interval_secs = self
            .auto_save_interval_secs
            .clamp(Self::MIN_AUTO_SAVE_SECS, Self::MAX_AUTO_SAVE_SECS);

        self.syntax_theme = self.syntax_theme.trim().to_string();
    }

    /// Deserialize and sanitize in one step.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Auto-save interval as a `Duration`.
    pub fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.auto_save_interval_secs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
