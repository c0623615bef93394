//! The overlay coordinator state machine.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{
    Element, FocusRequest, FocusTarget, HitTest, OverlayError, OverlayId, OverlaySpec, Point,
    ScrollLock,
};

/// Default settle delay before focus moves into a freshly opened overlay.
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Entry {
    spec: OverlaySpec,
    is_open: bool,
    pending_focus: Option<PendingFocus>,
}

#[derive(Debug)]
struct PendingFocus {
    generation: u64,
    cancel: CancellationToken,
}

impl Entry {
    fn new(spec: OverlaySpec) -> Self {
        Self {
            spec,
            is_open: false,
            pending_focus: None,
        }
    }

    fn cancel_pending_focus(&mut self) {
        if let Some(pending) = self.pending_focus.take() {
            pending.cancel.cancel();
        }
    }
}

/// Result of a successful [`OverlayCoordinator::open`].
#[derive(Debug, Default)]
pub struct OpenOutcome {
    /// Modal overlays closed to keep the modal group exclusive.
    pub displaced: Vec<OverlayId>,
    /// Deferred focus transfer the runtime should schedule.
    pub focus: Option<FocusRequest>,
}

/// Owner of every overlay's open/closed state.
///
/// Constructed once at startup and owned by the application state; trigger
/// widgets receive it by reference. Every operation taking an id returns
/// [`OverlayError::UnknownOverlay`] for unregistered ids and leaves state
/// untouched.
#[derive(Debug)]
pub struct OverlayCoordinator {
    entries: BTreeMap<OverlayId, Entry>,
    scroll_lock: ScrollLock,
    focus_delay: Duration,
    focused: Option<(OverlayId, FocusTarget)>,
    focus_generation: u64,
}

impl Default for OverlayCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_DELAY)
    }
}

impl OverlayCoordinator {
    pub fn new(focus_delay: Duration) -> Self {
        Self {
            entries: BTreeMap::new(),
            scroll_lock: ScrollLock::default(),
            focus_delay,
            focused: None,
            focus_generation: 0,
        }
    }

    /// Registers an overlay in the Closed state.
    ///
    /// Re-registering an id closes it first (running its cleanup) and then
    /// replaces its policy.
    pub fn register(&mut self, spec: OverlaySpec) {
        let id = spec.id;
        if self.entries.contains_key(&id) {
            tracing::debug!(overlay = %id, "re-registering overlay");
            self.close_entry(id);
        }
        self.entries.insert(id, Entry::new(spec));
    }

    pub fn is_registered(&self, id: OverlayId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn spec(&self, id: OverlayId) -> Result<&OverlaySpec, OverlayError> {
        self.entry(id).map(|entry| &entry.spec)
    }

    pub fn is_open(&self, id: OverlayId) -> Result<bool, OverlayError> {
        self.entry(id).map(|entry| entry.is_open)
    }

    /// Ids of all open overlays, in id order.
    pub fn open_overlays(&self) -> Vec<OverlayId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_open)
            .map(|(id, _)| *id)
            .collect()
    }

    /// The open modal overlay, if any (at most one by construction).
    pub fn active_modal(&self) -> Option<OverlayId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.is_open && entry.spec.modal)
            .map(|(id, _)| *id)
    }

    pub fn any_open(&self) -> bool {
        self.entries.values().any(|entry| entry.is_open)
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    pub fn scroll_lock_count(&self) -> usize {
        self.scroll_lock.count()
    }

    /// Currently focused overlay element; `None` means the page has focus.
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused.map(|(_, target)| target)
    }

    /// Opens an overlay.
    ///
    /// Opening an already-open overlay re-affirms its side effects only: the
    /// pending focus request is replaced and the scroll lock is not taken
    /// again.
    pub fn open(&mut self, id: OverlayId) -> Result<OpenOutcome, OverlayError> {
        let spec = self.entry(id)?.spec.clone();
        let mut outcome = OpenOutcome::default();

        if spec.modal {
            let others: Vec<OverlayId> = self
                .entries
                .iter()
                .filter(|(other, entry)| **other != id && entry.is_open && entry.spec.modal)
                .map(|(other, _)| *other)
                .collect();
            for other in others {
                if self.close_entry(other) {
                    outcome.displaced.push(other);
                }
            }
        }

        let focus_delay = self.focus_delay;
        self.focus_generation = self.focus_generation.wrapping_add(1);
        let generation = self.focus_generation;
        let entry = self.entry_mut(id)?;
        let newly_opened = !entry.is_open;
        entry.is_open = true;
        entry.cancel_pending_focus();

        if let Some(target) = spec.focus_target {
            let cancel = CancellationToken::new();
            entry.pending_focus = Some(PendingFocus {
                generation,
                cancel: cancel.clone(),
            });
            outcome.focus = Some(FocusRequest {
                overlay: id,
                target,
                delay: focus_delay,
                generation,
                cancel,
            });
        }

        if newly_opened && spec.blocks_background_scroll {
            self.scroll_lock.acquire();
        }

        tracing::debug!(
            overlay = %id,
            newly_opened,
            displaced = outcome.displaced.len(),
            scroll_lock = self.scroll_lock.count(),
            "overlay opened"
        );
        Ok(outcome)
    }

    /// Closes an overlay; returns whether it was open.
    pub fn close(&mut self, id: OverlayId) -> Result<bool, OverlayError> {
        self.entry(id)?;
        Ok(self.close_entry(id))
    }

    /// Opens if closed, closes if open. Returns the new open state.
    pub fn toggle(&mut self, id: OverlayId) -> Result<bool, OverlayError> {
        if self.is_open(id)? {
            self.close(id)?;
            Ok(false)
        } else {
            self.open(id)?;
            Ok(true)
        }
    }

    /// Closes every open overlay and returns the ids that were closed.
    pub fn close_all(&mut self) -> Vec<OverlayId> {
        let open = self.open_overlays();
        open.into_iter().filter(|id| self.close_entry(*id)).collect()
    }

    /// Escape handling: closes every open overlay with `close_on_escape`.
    pub fn dismiss_on_escape(&mut self) -> Vec<OverlayId> {
        let targets: Vec<OverlayId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_open && entry.spec.close_on_escape)
            .map(|(id, _)| *id)
            .collect();
        targets
            .into_iter()
            .filter(|id| self.close_entry(*id))
            .collect()
    }

    /// Outside-click handling.
    ///
    /// Closes every open overlay with `close_on_outside_click` whose surface
    /// and trigger both miss `point`.
    pub fn dismiss_on_click(&mut self, point: Point, hit: &impl HitTest) -> Vec<OverlayId> {
        let targets: Vec<OverlayId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_open && entry.spec.close_on_outside_click)
            .map(|(id, _)| *id)
            .filter(|id| {
                !hit.contains_point(Element::Surface(*id), point)
                    && !hit.contains_point(Element::Trigger(*id), point)
            })
            .collect();
        targets
            .into_iter()
            .filter(|id| self.close_entry(*id))
            .collect()
    }

    /// Completes a deferred focus transfer.
    ///
    /// Focus moves only when the request has not been cancelled, was issued
    /// for the overlay's current open cycle and the overlay is still open.
    pub fn apply_focus(&mut self, request: &FocusRequest) -> bool {
        if request.is_cancelled() {
            return false;
        }
        let Some(entry) = self.entries.get_mut(&request.overlay) else {
            return false;
        };
        let current = entry
            .pending_focus
            .as_ref()
            .is_some_and(|pending| pending.generation == request.generation);
        if !entry.is_open || !current {
            return false;
        }
        entry.pending_focus = None;
        self.focused = Some((request.overlay, request.target));
        tracing::debug!(overlay = %request.overlay, target = ?request.target, "focus moved");
        true
    }

    /// Moves focus immediately; used when the user clicks into a field.
    pub fn focus_now(&mut self, id: OverlayId, target: FocusTarget) -> Result<bool, OverlayError> {
        let entry = self.entry_mut(id)?;
        if !entry.is_open {
            return Ok(false);
        }
        entry.cancel_pending_focus();
        self.focused = Some((id, target));
        Ok(true)
    }

    /// Hands focus back to the page.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    fn close_entry(&mut self, id: OverlayId) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if !entry.is_open {
            return false;
        }
        entry.is_open = false;
        entry.cancel_pending_focus();
        if entry.spec.blocks_background_scroll {
            self.scroll_lock.release();
        }
        if self.focused.is_some_and(|(owner, _)| owner == id) {
            self.focused = None;
        }
        tracing::debug!(overlay = %id, scroll_lock = self.scroll_lock.count(), "overlay closed");
        true
    }

    fn entry(&self, id: OverlayId) -> Result<&Entry, OverlayError> {
        self.entries.get(&id).ok_or(OverlayError::UnknownOverlay(id))
    }

    fn entry_mut(&mut self, id: OverlayId) -> Result<&mut Entry, OverlayError> {
        self.entries
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{Bounds, BoundsMap};

    fn coordinator() -> OverlayCoordinator {
        let mut c = OverlayCoordinator::default();
        c.register(OverlaySpec::modal(OverlayId::Search).with_focus(FocusTarget::SearchQuery));
        c.register(OverlaySpec::modal(OverlayId::CreateThread).with_focus(FocusTarget::ThreadTitle));
        c.register(OverlaySpec::drawer(OverlayId::NavDrawer));
        c.register(OverlaySpec::modal(OverlayId::Dialog(1)));
        c
    }

    fn search_layout() -> BoundsMap {
        let mut map = BoundsMap::new();
        map.insert(
            Element::Surface(OverlayId::Search),
            Bounds::new(10, 5, 40, 10),
        );
        map.insert(
            Element::Trigger(OverlayId::Search),
            Bounds::new(70, 0, 8, 1),
        );
        map
    }

    #[test]
    fn test_all_overlays_start_closed() {
        let c = coordinator();
        for id in [
            OverlayId::Search,
            OverlayId::CreateThread,
            OverlayId::NavDrawer,
            OverlayId::Dialog(1),
        ] {
            assert_eq!(c.is_open(id), Ok(false));
        }
        assert!(!c.scroll_locked());
        assert!(c.focused().is_none());
    }

    #[test]
    fn test_open_then_close() {
        let mut c = coordinator();
        c.open(OverlayId::Search).unwrap();
        assert_eq!(c.is_open(OverlayId::Search), Ok(true));
        assert_eq!(c.close(OverlayId::Search), Ok(true));
        assert_eq!(c.is_open(OverlayId::Search), Ok(false));
        assert_eq!(c.close(OverlayId::Search), Ok(false));
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut c = coordinator();
        c.open(OverlayId::NavDrawer).unwrap();
        c.open(OverlayId::NavDrawer).unwrap();
        assert_eq!(c.open_overlays(), vec![OverlayId::NavDrawer]);
        assert_eq!(c.scroll_lock_count(), 1);
        c.close(OverlayId::NavDrawer).unwrap();
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut c = coordinator();
        assert_eq!(c.toggle(OverlayId::NavDrawer), Ok(true));
        assert_eq!(c.toggle(OverlayId::NavDrawer), Ok(false));
        assert_eq!(c.is_open(OverlayId::NavDrawer), Ok(false));
        assert_eq!(c.scroll_lock_count(), 0);
    }

    #[test]
    fn test_open_then_toggle_nav_drawer_closes_it() {
        let mut c = coordinator();
        c.open(OverlayId::NavDrawer).unwrap();
        c.toggle(OverlayId::NavDrawer).unwrap();
        assert_eq!(c.is_open(OverlayId::NavDrawer), Ok(false));
    }

    #[test]
    fn test_scroll_lock_is_reference_counted() {
        let mut c = coordinator();
        c.open(OverlayId::NavDrawer).unwrap();
        c.open(OverlayId::Search).unwrap();
        c.close(OverlayId::NavDrawer).unwrap();
        assert!(c.scroll_locked());
        c.close(OverlayId::Search).unwrap();
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_non_blocking_overlay_leaves_scroll_alone() {
        let mut c = OverlayCoordinator::default();
        c.register(OverlaySpec::drawer(OverlayId::NavDrawer).with_scroll_lock(false));
        c.open(OverlayId::NavDrawer).unwrap();
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_modal_overlays_are_mutually_exclusive() {
        let mut c = coordinator();
        c.open(OverlayId::NavDrawer).unwrap();
        c.open(OverlayId::Search).unwrap();
        let outcome = c.open(OverlayId::CreateThread).unwrap();
        assert_eq!(outcome.displaced, vec![OverlayId::Search]);
        assert_eq!(c.is_open(OverlayId::Search), Ok(false));
        assert_eq!(c.is_open(OverlayId::NavDrawer), Ok(true));
        assert_eq!(c.active_modal(), Some(OverlayId::CreateThread));
        assert_eq!(c.scroll_lock_count(), 2);
    }

    #[test]
    fn test_close_all_closes_everything() {
        let mut c = coordinator();
        c.open(OverlayId::NavDrawer).unwrap();
        c.open(OverlayId::Search).unwrap();
        let closed = c.close_all();
        assert_eq!(closed.len(), 2);
        assert_eq!(c.is_open(OverlayId::NavDrawer), Ok(false));
        assert_eq!(c.is_open(OverlayId::Search), Ok(false));
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_escape_closes_every_escapable_overlay() {
        let mut c = coordinator();
        c.register(OverlaySpec::modal(OverlayId::Dialog(2)).with_escape(false));
        c.open(OverlayId::NavDrawer).unwrap();
        c.open(OverlayId::Search).unwrap();
        let closed = c.dismiss_on_escape();
        assert_eq!(closed, vec![OverlayId::Search, OverlayId::NavDrawer]);

        c.open(OverlayId::Dialog(2)).unwrap();
        assert!(c.dismiss_on_escape().is_empty());
        assert_eq!(c.is_open(OverlayId::Dialog(2)), Ok(true));
    }

    #[test]
    fn test_search_escape_scenario() {
        let mut c = coordinator();
        c.open(OverlayId::Search).unwrap();
        assert_eq!(c.is_open(OverlayId::Search), Ok(true));
        assert!(c.scroll_locked());
        c.dismiss_on_escape();
        assert_eq!(c.is_open(OverlayId::Search), Ok(false));
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_outside_click_closes_search() {
        let mut c = coordinator();
        c.open(OverlayId::Search).unwrap();
        let closed = c.dismiss_on_click(Point::new(1, 20), &search_layout());
        assert_eq!(closed, vec![OverlayId::Search]);
        assert_eq!(c.is_open(OverlayId::Search), Ok(false));
    }

    #[test]
    fn test_click_inside_surface_keeps_search_open() {
        let mut c = coordinator();
        c.open(OverlayId::Search).unwrap();
        assert!(c.dismiss_on_click(Point::new(12, 6), &search_layout()).is_empty());
        assert_eq!(c.is_open(OverlayId::Search), Ok(true));
    }

    #[test]
    fn test_click_on_trigger_does_not_dismiss() {
        let mut c = coordinator();
        c.open(OverlayId::Search).unwrap();
        assert!(c.dismiss_on_click(Point::new(72, 0), &search_layout()).is_empty());
        assert_eq!(c.is_open(OverlayId::Search), Ok(true));
    }

    #[test]
    fn test_outside_click_respects_policy() {
        let mut c = OverlayCoordinator::default();
        c.register(OverlaySpec::modal(OverlayId::Dialog(3)).with_outside_click(false));
        c.open(OverlayId::Dialog(3)).unwrap();
        assert!(c.dismiss_on_click(Point::new(0, 0), &BoundsMap::new()).is_empty());
        assert_eq!(c.is_open(OverlayId::Dialog(3)), Ok(true));
    }

    #[test]
    fn test_unknown_overlay_is_error_without_side_effects() {
        let mut c = coordinator();
        let unknown = OverlayId::Dialog(42);
        assert_eq!(
            c.open(unknown).unwrap_err(),
            OverlayError::UnknownOverlay(unknown)
        );
        assert_eq!(c.close(unknown), Err(OverlayError::UnknownOverlay(unknown)));
        assert_eq!(c.toggle(unknown), Err(OverlayError::UnknownOverlay(unknown)));
        assert_eq!(c.is_open(unknown), Err(OverlayError::UnknownOverlay(unknown)));
        assert!(c.open_overlays().is_empty());
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_open_issues_focus_request() {
        let mut c = coordinator();
        let focus = c.open(OverlayId::Search).unwrap().focus.unwrap();
        assert_eq!(focus.overlay, OverlayId::Search);
        assert_eq!(focus.target, FocusTarget::SearchQuery);
        assert_eq!(focus.delay, DEFAULT_FOCUS_DELAY);
        assert!(c.focused().is_none());

        assert!(c.apply_focus(&focus));
        assert_eq!(c.focused(), Some(FocusTarget::SearchQuery));
    }

    #[test]
    fn test_overlay_without_focus_target_issues_no_request() {
        let mut c = coordinator();
        assert!(c.open(OverlayId::NavDrawer).unwrap().focus.is_none());
    }

    #[test]
    fn test_close_cancels_pending_focus() {
        let mut c = coordinator();
        let focus = c.open(OverlayId::Search).unwrap().focus.unwrap();
        c.close(OverlayId::Search).unwrap();
        assert!(focus.is_cancelled());
        assert!(!c.apply_focus(&focus));
        assert!(c.focused().is_none());
    }

    #[test]
    fn test_reopen_replaces_pending_focus() {
        let mut c = coordinator();
        let first = c.open(OverlayId::Search).unwrap().focus.unwrap();
        let second = c.open(OverlayId::Search).unwrap().focus.unwrap();
        assert!(first.is_cancelled());
        assert!(!c.apply_focus(&first));
        assert!(c.apply_focus(&second));
    }

    #[test]
    fn test_displaced_modal_loses_focus() {
        let mut c = coordinator();
        let focus = c.open(OverlayId::Search).unwrap().focus.unwrap();
        assert!(c.apply_focus(&focus));
        c.open(OverlayId::CreateThread).unwrap();
        assert!(c.focused().is_none());
    }

    #[test]
    fn test_focus_now_requires_open_overlay() {
        let mut c = coordinator();
        assert_eq!(
            c.focus_now(OverlayId::Search, FocusTarget::SearchQuery),
            Ok(false)
        );
        c.open(OverlayId::Search).unwrap();
        assert_eq!(
            c.focus_now(OverlayId::Search, FocusTarget::SearchQuery),
            Ok(true)
        );
        assert_eq!(c.focused(), Some(FocusTarget::SearchQuery));
    }

    #[test]
    fn test_register_replaces_policy_and_closes() {
        let mut c = coordinator();
        c.open(OverlayId::Search).unwrap();
        c.register(OverlaySpec::modal(OverlayId::Search).with_scroll_lock(false));
        assert_eq!(c.is_open(OverlayId::Search), Ok(false));
        assert!(!c.scroll_locked());
        c.open(OverlayId::Search).unwrap();
        assert!(!c.scroll_locked());
    }
}
