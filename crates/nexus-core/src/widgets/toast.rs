//! Transient toast notifications.

use std::time::{Duration, Instant};

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }
}

/// Fire-and-forget sink for user-visible messages.
pub trait ToastNotifier {
    fn notify(&mut self, message: impl Into<String>, kind: ToastKind);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

/// Single-slot toast display.
///
/// A new toast replaces the one on screen and restarts the hide timer.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    current: Option<Toast>,
    duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let message = message.into();
        tracing::debug!(?kind, %message, "toast");
        self.current = Some(Toast {
            message,
            kind,
            shown_at: now,
        });
    }

    /// Hides the toast once its duration has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| now.saturating_duration_since(toast.shown_at) >= self.duration)
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl ToastNotifier for ToastQueue {
    fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.show_at(message, kind, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_hides_after_duration() {
        let mut toasts = ToastQueue::new(Duration::from_millis(3000));
        let start = Instant::now();
        toasts.show_at("Saved!", ToastKind::Success, start);
        toasts.tick(start + Duration::from_millis(2999));
        assert!(toasts.is_visible());
        toasts.tick(start + Duration::from_millis(3000));
        assert!(!toasts.is_visible());
    }

    #[test]
    fn test_new_toast_replaces_current_and_restarts_timer() {
        let mut toasts = ToastQueue::new(Duration::from_millis(3000));
        let start = Instant::now();
        toasts.show_at("first", ToastKind::Info, start);
        let later = start + Duration::from_millis(2000);
        toasts.show_at("second", ToastKind::Error, later);
        toasts.tick(start + Duration::from_millis(3500));

        let toast = toasts.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn test_notify_through_trait() {
        fn post(sink: &mut impl ToastNotifier) {
            sink.notify("hello", ToastKind::Warning);
        }
        let mut toasts = ToastQueue::default();
        post(&mut toasts);
        assert_eq!(toasts.current().unwrap().kind, ToastKind::Warning);
        assert_eq!(ToastKind::Warning.icon(), "⚠");
    }
}
