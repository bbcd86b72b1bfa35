//! File operations module for inkpad
//!
//! Reading and atomically writing documents, and the periodic autosave timer.

mod autosave;
mod io;

pub use autosave::{Autosave, AutosaveOutcome};
pub use io::{read_file, write_file};
