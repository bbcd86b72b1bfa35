//! Configuration module for inkpad
//!
//! User preferences and loading them from the platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
