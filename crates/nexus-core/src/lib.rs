//! Core Nexus library (overlays, widgets, forum content, config).

pub mod config;
pub mod forum;
pub mod interrupt;
pub mod logging;
pub mod overlay;
pub mod particles;
pub mod prefs;
pub mod widgets;
