//! Overlay panels.
//!
//! Open/closed state lives in the core `OverlayCoordinator`; this module
//! holds per-panel input state, key handling and rendering. A panel's
//! `handle_key` never touches the coordinator directly: it returns an
//! [`OverlayUpdate`] and the reducer applies the transition.

mod auth_dialog;
mod create_thread;
mod nav_drawer;
pub mod render_utils;
mod search;

pub use auth_dialog::{AuthDialog, AuthKind};
pub use create_thread::{CreateThreadField, CreateThreadPanel};
pub use nav_drawer::{NavDrawer, NavItem};
use nexus_core::overlay::OverlayId;
use nexus_core::widgets::ThreadForm;
use nexus_core::widgets::ToastKind;
pub use search::SearchPanel;

pub const LOGIN_DIALOG: OverlayId = OverlayId::Dialog(1);
pub const SIGNUP_DIALOG: OverlayId = OverlayId::Dialog(2);

/// What happens to the panel after it handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
    /// Close this panel and open another one.
    Open(OverlayId),
}

/// Application-level request raised by a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    OpenThread(String),
    CreateThread(ThreadForm),
    SignedIn(String),
    ToggleTheme,
    GoHome,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub action: Option<OverlayAction>,
    pub toast: Option<(String, ToastKind)>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            action: None,
            toast: None,
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            ..Self::stay()
        }
    }

    pub fn open(id: OverlayId) -> Self {
        Self {
            transition: OverlayTransition::Open(id),
            ..Self::stay()
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: OverlayAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_toast(mut self, message: impl Into<String>, kind: ToastKind) -> Self {
        self.toast = Some((message.into(), kind));
        self
    }
}

/// Keys that edit text rather than navigate. Used by the reducer to move
/// focus into a panel as soon as the user starts typing.
pub(crate) fn is_text_input(key: &crossterm::event::KeyEvent) -> bool {
    use crossterm::event::{KeyCode, KeyModifiers};
    match key.code {
        KeyCode::Char(_) => !key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Backspace => true,
        _ => false,
    }
}
