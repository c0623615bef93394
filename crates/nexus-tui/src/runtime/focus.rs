//! Settle timer for deferred focus.

use nexus_core::overlay::FocusRequest;

use crate::events::UiEvent;

/// Waits out the request's delay. Returns `None` when the token fires first
/// (the overlay closed or re-opened in the meantime).
pub async fn focus_timer(request: FocusRequest) -> Option<FocusRequest> {
    let cancel = request.cancel.clone();
    tokio::select! {
        () = cancel.cancelled() => None,
        () = tokio::time::sleep(request.delay) => {
            (!request.is_cancelled()).then_some(request)
        }
    }
}

pub async fn focus_due(request: FocusRequest) -> Option<UiEvent> {
    focus_timer(request).await.map(UiEvent::FocusDue)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nexus_core::overlay::{FocusTarget, OverlayCoordinator, OverlayId, OverlaySpec};

    use super::*;

    fn request() -> FocusRequest {
        let mut overlays = OverlayCoordinator::new(Duration::from_millis(300));
        overlays
            .register(OverlaySpec::modal(OverlayId::Search).with_focus(FocusTarget::SearchQuery));
        overlays.open(OverlayId::Search).unwrap().focus.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_timer_fires_after_delay() {
        let req = request();
        let started = tokio::time::Instant::now();
        let due = focus_timer(req).await;
        assert!(due.is_some());
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_timer_cancelled_before_delay() {
        let req = request();
        let cancel = req.cancel.clone();
        let handle = tokio::spawn(focus_timer(req));
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        assert!(handle.await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_due_wraps_event() {
        let event = focus_due(request()).await;
        assert!(matches!(event, Some(UiEvent::FocusDue(_))));
    }
}
