//! Trailing-edge debouncer driven by explicit instants.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Holds the latest value until `wait` passes with no newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the wait.
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending value fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.wait)
    }

    /// Releases the pending value once quiet for `wait`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        d.call(80u16, start);
        assert_eq!(d.poll(start + Duration::from_millis(100)), None);
        assert_eq!(d.poll(start + DEFAULT_DEBOUNCE), Some(80));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_burst_keeps_last_value() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        d.call(80u16, start);
        d.call(120, start + Duration::from_millis(200));
        assert_eq!(d.poll(start + Duration::from_millis(300)), None);
        assert_eq!(d.poll(start + Duration::from_millis(450)), Some(120));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.call((), start);
        d.cancel();
        assert_eq!(d.poll(start + Duration::from_secs(1)), None);
    }
}
