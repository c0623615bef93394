//! Deferred focus requests.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::OverlayId;

/// Focusable input elements owned by overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    SearchQuery,
    ThreadTitle,
    LoginUsername,
    SignupUsername,
}

/// A focus transfer scheduled to run after the overlay's open transition.
///
/// The runtime waits `delay`, then hands the request back to
/// [`OverlayCoordinator::apply_focus`](super::OverlayCoordinator::apply_focus)
/// unless `cancel` fired in the meantime. Closing or re-opening the overlay
/// cancels the token.
#[derive(Debug, Clone)]
pub struct FocusRequest {
    pub overlay: OverlayId,
    pub target: FocusTarget,
    pub delay: Duration,
    /// Open cycle this request belongs to; stale generations are ignored.
    pub generation: u64,
    pub cancel: CancellationToken,
}

impl FocusRequest {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
