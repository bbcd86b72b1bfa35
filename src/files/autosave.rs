//! Periodic autosave
//!
//! The host calls [`Autosave::tick`] from its event loop. A document is only
//! written when the interval has elapsed, it has unsaved changes and it
//! already has a path on disk. Untitled documents are never prompted for.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::Settings;
use crate::editor::Document;
use crate::error::Result;

/// What a call to [`Autosave::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// The interval has not elapsed since the last check
    NotDue,
    /// Due, but the document has no unsaved changes
    Clean,
    /// Due and modified, but the document has no path yet
    Untitled,
    /// The document was written to its path
    Saved,
}

/// Interval timer deciding when to write a document back to disk.
#[derive(Debug, Clone)]
pub struct Autosave {
    interval: Duration,
    last_check: Instant,
}

impl Autosave {
    /// Start a timer; the first save is due one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_check: now,
        }
    }

    /// Build the timer from settings. Returns `None` when autosave is off.
    pub fn from_settings(settings: &Settings, now: Instant) -> Option<Self> {
        if !settings.auto_save {
            debug!("Autosave disabled");
            return None;
        }
        Some(Self::new(settings.auto_save_interval(), now))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Save `document` if the interval has elapsed.
    ///
    /// The timer restarts whenever the interval has elapsed, whatever the
    /// outcome. A failed write is returned and retried on the next due tick.
    ///
    /// # Errors
    ///
    /// Propagates the `Error::FileWrite` from the save.
    pub fn tick(&mut self, now: Instant, document: &mut Document) -> Result<AutosaveOutcome> {
        if now.saturating_duration_since(self.last_check) < self.interval {
            return Ok(AutosaveOutcome::NotDue);
        }
        self.last_check = now;

        if !document.is_modified() {
            return Ok(AutosaveOutcome::Clean);
        }
        if document.path().is_none() {
            debug!("Skipping autosave of untitled document");
            return Ok(AutosaveOutcome::Untitled);
        }

        document.save()?;
        if let Some(path) = document.path() {
            info!("Autosaved {}", path.display());
        }
        Ok(AutosaveOutcome::Saved)
    }
}
