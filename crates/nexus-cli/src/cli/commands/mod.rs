//! CLI command handlers.

pub mod config;
pub mod prefs;
pub mod strength;
pub mod theme;
pub mod tui;
