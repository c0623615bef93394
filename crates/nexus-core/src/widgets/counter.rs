//! Animated statistic counters.

use std::time::{Duration, Instant};

pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Nominal frame length the increment is computed against (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

/// Counts from zero up to a target.
///
/// Each 16 ms frame adds `target / (duration / 16)`; once the running value
/// reaches the target the counter shows the exact target.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    duration: Duration,
    started_at: Option<Instant>,
}

impl CounterAnimation {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: None,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Starts the animation; later calls are ignored.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.current(now) >= self.target as f64
    }

    /// Running value at `now`, capped at the target.
    pub fn current(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let frames_total = self.duration.as_millis() as f64 / FRAME.as_millis() as f64;
        if frames_total <= 0.0 {
            return self.target as f64;
        }
        let increment = self.target as f64 / frames_total;
        let frames = (now.saturating_duration_since(started_at).as_millis() / FRAME.as_millis())
            as f64
            + 1.0;
        (increment * frames).min(self.target as f64)
    }

    /// Display text: `floor(current)` while running, exact target when done.
    pub fn display(&self, now: Instant) -> String {
        if !self.is_started() {
            return format_thousands(0);
        }
        let current = self.current(now);
        if current < self.target as f64 {
            format_thousands(current.floor() as u64)
        } else {
            format_thousands(self.target)
        }
    }
}

/// Formats with comma thousands separators (`12,345`).
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
