//! Interactive widget state.
//!
//! Everything here is plain data driven by explicit `Instant`/`DateTime`
//! arguments; the TUI owns the clock.

pub mod bookmark;
pub mod counter;
pub mod debounce;
pub mod forms;
pub mod konami;
pub mod loading;
pub mod password;
pub mod progress;
pub mod reveal;
pub mod tabs;
pub mod theme;
pub mod timefmt;
pub mod toast;
pub mod vote;

pub use bookmark::Bookmarks;
pub use counter::{CounterAnimation, format_thousands};
pub use debounce::Debouncer;
pub use forms::{LoginForm, SignupForm, ThreadForm, ValidationError, submit_reply};
pub use konami::{KonamiDetector, KonamiKey};
pub use loading::{LoadingPhase, LoadingScreen};
pub use password::{Strength, Visibility};
pub use reveal::RevealTracker;
pub use tabs::{Tabs, ThreadFilter};
pub use theme::Theme;
pub use timefmt::format_relative;
pub use toast::{Toast, ToastKind, ToastNotifier, ToastQueue};
pub use vote::{VoteDirection, VoteState};
