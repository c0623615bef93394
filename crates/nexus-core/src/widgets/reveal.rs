//! Scroll-into-view reveal tracking.
//!
//! Elements register with a visibility threshold. As the viewport moves, each
//! element's visible fraction is fed in; once it crosses its threshold the
//! element is revealed and stays revealed.

use std::collections::HashMap;
use std::hash::Hash;

/// Threshold for stat counters.
pub const COUNTER_THRESHOLD: f32 = 0.5;
/// Threshold for cards and other content blocks.
pub const CONTENT_THRESHOLD: f32 = 0.1;

/// Fraction of a vertical span that falls inside the viewport.
///
/// `bottom_margin` shrinks the viewport from the bottom edge so elements
/// reveal slightly after they enter.
pub fn visible_fraction(
    top: u32,
    height: u32,
    viewport_top: u32,
    viewport_height: u32,
    bottom_margin: u32,
) -> f32 {
    if height == 0 {
        return 0.0;
    }
    let viewport_bottom = viewport_top + viewport_height.saturating_sub(bottom_margin);
    let bottom = top + height;
    let start = top.max(viewport_top);
    let end = bottom.min(viewport_bottom);
    if end <= start {
        return 0.0;
    }
    (end - start) as f32 / height as f32
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Watch {
    threshold: f32,
    revealed: bool,
}

#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    watches: HashMap<K, Watch>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            watches: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts watching `key`. Re-observing keeps an existing reveal.
    pub fn observe(&mut self, key: K, threshold: f32) {
        self.watches
            .entry(key)
            .and_modify(|w| w.threshold = threshold)
            .or_insert(Watch {
                threshold,
                revealed: false,
            });
    }

    /// Feeds a visibility sample. Returns `true` only on the first crossing.
    pub fn update(&mut self, key: &K, fraction: f32) -> bool {
        match self.watches.get_mut(key) {
            Some(watch) if !watch.revealed && fraction >= watch.threshold => {
                watch.revealed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.watches.get(key).is_some_and(|w| w.revealed)
    }

    pub fn pending(&self) -> impl Iterator<Item = &K> {
        self.watches
            .iter()
            .filter(|(_, w)| !w.revealed)
            .map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_fraction() {
        assert_eq!(visible_fraction(0, 10, 0, 20, 0), 1.0);
        assert_eq!(visible_fraction(15, 10, 0, 20, 0), 0.5);
        assert_eq!(visible_fraction(30, 10, 0, 20, 0), 0.0);
        assert_eq!(visible_fraction(15, 10, 0, 20, 5), 0.0);
        assert_eq!(visible_fraction(0, 0, 0, 20, 0), 0.0);
    }

    #[test]
    fn test_reveal_fires_once() {
        let mut t = RevealTracker::new();
        t.observe("stats", COUNTER_THRESHOLD);
        assert!(!t.update(&"stats", 0.3));
        assert!(t.update(&"stats", 0.5));
        assert!(!t.update(&"stats", 1.0));
        assert!(t.is_revealed(&"stats"));
        assert!(!t.update(&"stats", 0.0));
        assert!(t.is_revealed(&"stats"));
    }

    #[test]
    fn test_unobserved_key_never_reveals() {
        let mut t: RevealTracker<&str> = RevealTracker::new();
        assert!(!t.update(&"card", 1.0));
        assert!(!t.is_revealed(&"card"));
    }

    #[test]
    fn test_pending_lists_unrevealed() {
        let mut t = RevealTracker::new();
        t.observe(1, CONTENT_THRESHOLD);
        t.observe(2, CONTENT_THRESHOLD);
        t.update(&1, 0.2);
        assert_eq!(t.pending().collect::<Vec<_>>(), vec![&2]);
    }
}
