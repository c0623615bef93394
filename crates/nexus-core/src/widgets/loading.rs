//! Startup loading screen.

use std::time::{Duration, Instant};

use crate::particles::random_unit;

pub const DEFAULT_LOADING_DURATION: Duration = Duration::from_millis(1500);
pub const FADE_DURATION: Duration = Duration::from_millis(500);

pub const MESSAGES: [&str; 5] = [
    "INITIALIZING NEXUS...",
    "LOADING QUANTUM DATA...",
    "CONNECTING TO MATRIX...",
    "ACTIVATING SYSTEMS...",
    "PREPARING INTERFACE...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Showing,
    Fading,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct LoadingScreen {
    message: &'static str,
    started_at: Instant,
    duration: Duration,
}

impl LoadingScreen {
    pub fn new(started_at: Instant, duration: Duration) -> Self {
        let index = ((random_unit() * MESSAGES.len() as f64) as usize).min(MESSAGES.len() - 1);
        Self::with_message(MESSAGES[index], started_at, duration)
    }

    pub fn with_message(message: &'static str, started_at: Instant, duration: Duration) -> Self {
        Self {
            message,
            started_at,
            duration,
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn phase(&self, now: Instant) -> LoadingPhase {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed < self.duration {
            LoadingPhase::Showing
        } else if elapsed < self.duration + FADE_DURATION {
            LoadingPhase::Fading
        } else {
            LoadingPhase::Hidden
        }
    }

    /// Remaining opacity during the fade, `1.0` while showing.
    pub fn opacity(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        match self.phase(now) {
            LoadingPhase::Showing => 1.0,
            LoadingPhase::Hidden => 0.0,
            LoadingPhase::Fading => {
                let into_fade = (elapsed - self.duration).as_secs_f64();
                1.0 - into_fade / FADE_DURATION.as_secs_f64()
            }
        }
    }

    /// Skips straight to the fade.
    pub fn dismiss(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed < self.duration {
            self.duration = elapsed;
        }
    }
}
