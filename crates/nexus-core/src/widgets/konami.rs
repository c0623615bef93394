//! Konami code detector and matrix mode.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KonamiKey {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Any key with no place in the code (Enter, Tab, chords).
    Other,
}

const SEQUENCE: [KonamiKey; 10] = [
    KonamiKey::Up,
    KonamiKey::Up,
    KonamiKey::Down,
    KonamiKey::Down,
    KonamiKey::Left,
    KonamiKey::Right,
    KonamiKey::Left,
    KonamiKey::Right,
    KonamiKey::Char('b'),
    KonamiKey::Char('a'),
];

pub const MATRIX_DURATION: Duration = Duration::from_secs(5);
pub const ACTIVATED_MESSAGE: &str = "🎮 Konami Code Activated! Matrix Mode ON 🎮";

/// Rolling window over the last ten keys.
#[derive(Debug, Clone, Default)]
pub struct KonamiDetector {
    recent: VecDeque<KonamiKey>,
    matrix_since: Option<Instant>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key. Returns `true` when the window matches the code.
    /// Letters compare exactly, so `B` is not `b`.
    pub fn push(&mut self, key: KonamiKey, now: Instant) -> bool {
        self.recent.push_back(key);
        while self.recent.len() > SEQUENCE.len() {
            self.recent.pop_front();
        }
        let matched = self.recent.iter().eq(SEQUENCE.iter());
        if matched {
            self.recent.clear();
            self.matrix_since = Some(now);
        }
        matched
    }

    pub fn matrix_active(&self, now: Instant) -> bool {
        self.matrix_since
            .is_some_and(|since| now.saturating_duration_since(since) < MATRIX_DURATION)
    }

    /// Clears matrix mode once it has run its course.
    pub fn tick(&mut self, now: Instant) {
        if self.matrix_since.is_some() && !self.matrix_active(now) {
            self.matrix_since = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(d: &mut KonamiDetector, keys: &[KonamiKey], now: Instant) -> bool {
        let mut last = false;
        for k in keys {
            last = d.push(*k, now);
        }
        last
    }

    #[test]
    fn test_full_sequence_activates() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        assert!(feed(&mut d, &SEQUENCE, now));
        assert!(d.matrix_active(now));
    }

    #[test]
    fn test_prefix_noise_is_tolerated() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        d.push(KonamiKey::Char('x'), now);
        d.push(KonamiKey::Left, now);
        assert!(feed(&mut d, &SEQUENCE, now));
    }

    #[test]
    fn test_wrong_order_does_not_activate() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        let mut keys = SEQUENCE;
        keys.swap(8, 9);
        assert!(!feed(&mut d, &keys, now));
        assert!(!d.matrix_active(now));
    }

    #[test]
    fn test_uppercase_letters_do_not_count() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        let mut keys = SEQUENCE;
        keys[8] = KonamiKey::Char('B');
        keys[9] = KonamiKey::Char('A');
        assert!(!feed(&mut d, &keys, now));
    }

    #[test]
    fn test_other_key_breaks_the_sequence() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        assert!(!feed(&mut d, &SEQUENCE[..5], now));
        d.push(KonamiKey::Other, now);
        assert!(!feed(&mut d, &SEQUENCE[5..], now));
        assert!(!d.matrix_active(now));
    }

    #[test]
    fn test_matrix_mode_expires() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        feed(&mut d, &SEQUENCE, now);
        let later = now + MATRIX_DURATION;
        assert!(!d.matrix_active(later));
        d.tick(later);
        assert!(d.matrix_since.is_none());
    }
}
