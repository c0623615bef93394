//! Shared helpers for the TUI.

pub mod clipboard;
mod palette;
mod scrollbar;
mod text;
mod text_field;

pub use palette::Palette;
pub use scrollbar::Scrollbar;
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis, wrap};
pub use text_field::TextField;
