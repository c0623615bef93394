//! UI effect types.
//!
//! Effects are commands returned by the reducer for the runtime to execute.
//! The reducer mutates state only; timers, clipboard and disk writes happen
//! in the runtime.

use nexus_core::overlay::FocusRequest;
use nexus_core::widgets::Theme;

#[derive(Debug, Clone)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Start the settle timer for a freshly opened overlay's focus target.
    ScheduleFocus(FocusRequest),

    /// Write the theme to the preference store.
    PersistTheme(Theme),

    /// Write the saved-thread set to the preference store.
    PersistBookmarks,

    /// Copy text (a post's code block) to the clipboard.
    CopyToClipboard { text: String },
}
