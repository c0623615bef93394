//! Overlay visibility coordination.
//!
//! Overlays are surfaces shown on top of the page: the search panel, the
//! create-thread panel, generic dialogs (login, signup) and the navigation
//! drawer. The [`OverlayCoordinator`] is the single owner of their
//! open/closed state and of the side effects visibility implies:
//!
//! - background scroll lock (reference counted across overlays)
//! - deferred focus transfer once the open transition settles
//! - Escape and outside-click dismissal
//!
//! ## Module Structure
//!
//! - `coordinator.rs`: `OverlayCoordinator` state machine
//! - `scroll_lock.rs`: reference-counted scroll lock
//! - `focus.rs`: cancellable focus requests
//! - `hit_test.rs`: `HitTest` capability used for outside-click dismissal
//! - `shortcuts.rs`: global key-chord table routed to coordinator operations

mod coordinator;
mod focus;
mod scroll_lock;
mod shortcuts;

use std::fmt;

pub use coordinator::{OpenOutcome, OverlayCoordinator};
pub use focus::{FocusRequest, FocusTarget};
pub use hit_test::{Bounds, BoundsMap, Element, HitTest, Point};
pub use scroll_lock::ScrollLock;
pub use shortcuts::{KeyChord, ShortcutAction, Shortcuts};

/// Stable identifier of an overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayId {
    Search,
    CreateThread,
    NavDrawer,
    Dialog(u16),
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayId::Search => write!(f, "search"),
            OverlayId::CreateThread => write!(f, "create-thread"),
            OverlayId::NavDrawer => write!(f, "nav-drawer"),
            OverlayId::Dialog(n) => write!(f, "dialog-{n}"),
        }
    }
}

/// Per-overlay policy supplied at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    pub id: OverlayId,
    /// Open state suppresses page scrolling.
    pub blocks_background_scroll: bool,
    pub close_on_outside_click: bool,
    pub close_on_escape: bool,
    /// Member of the mutually exclusive modal group.
    ///
    /// Opening a modal overlay closes every other open modal overlay.
    pub modal: bool,
    /// Element that receives focus after the open transition settles.
    pub focus_target: Option<FocusTarget>,
}

impl OverlaySpec {
    /// Modal dialog defaults: blocks scroll, dismissable by click and Escape.
    pub fn modal(id: OverlayId) -> Self {
        Self {
            id,
            blocks_background_scroll: true,
            close_on_outside_click: true,
            close_on_escape: true,
            modal: true,
            focus_target: None,
        }
    }

    /// Drawer defaults: like a modal, but outside the exclusive modal group.
    pub fn drawer(id: OverlayId) -> Self {
        Self {
            modal: false,
            ..Self::modal(id)
        }
    }

    #[must_use]
    pub fn with_focus(mut self, target: FocusTarget) -> Self {
        self.focus_target = Some(target);
        self
    }

    #[must_use]
    pub fn with_scroll_lock(mut self, blocks: bool) -> Self {
        self.blocks_background_scroll = blocks;
        self
    }

    #[must_use]
    pub fn with_outside_click(mut self, closes: bool) -> Self {
        self.close_on_outside_click = closes;
        self
    }

    #[must_use]
    pub fn with_escape(mut self, closes: bool) -> Self {
        self.close_on_escape = closes;
        self
    }
}

/// Errors reported by coordinator operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// The operation referenced an id that was never registered.
    #[error("unknown overlay: {0}")]
    UnknownOverlay(OverlayId),
}
