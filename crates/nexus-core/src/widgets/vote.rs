//! Up/down voting on posts.

use std::time::{Duration, Instant};

/// How long the count stays highlighted after a vote.
pub const BUMP_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    fn sign(self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteState {
    count: i64,
    active: Option<VoteDirection>,
    bumped_at: Option<Instant>,
}

impl VoteState {
    pub fn new(count: i64) -> Self {
        Self {
            count,
            active: None,
            bumped_at: None,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn active(&self) -> Option<VoteDirection> {
        self.active
    }

    /// Applies a vote press.
    ///
    /// Pressing the active direction retracts it; pressing the opposite one
    /// swings the count by two; otherwise the count moves by one.
    pub fn press(&mut self, direction: VoteDirection, now: Instant) {
        let sign = direction.sign();
        match self.active {
            Some(active) if active == direction => {
                self.count -= sign;
                self.active = None;
            }
            Some(_) => {
                self.count += 2 * sign;
                self.active = Some(direction);
            }
            None => {
                self.count += sign;
                self.active = Some(direction);
            }
        }
        self.bumped_at = Some(now);
    }

    pub fn is_bumped(&self, now: Instant) -> bool {
        self.bumped_at
            .is_some_and(|at| now.saturating_duration_since(at) < BUMP_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_vote_moves_by_one() {
        let now = Instant::now();
        let mut up = VoteState::new(10);
        up.press(VoteDirection::Up, now);
        assert_eq!(up.count(), 11);
        assert_eq!(up.active(), Some(VoteDirection::Up));

        let mut down = VoteState::new(10);
        down.press(VoteDirection::Down, now);
        assert_eq!(down.count(), 9);
    }

    #[test]
    fn test_pressing_active_direction_retracts() {
        let now = Instant::now();
        let mut v = VoteState::new(5);
        v.press(VoteDirection::Down, now);
        v.press(VoteDirection::Down, now);
        assert_eq!(v.count(), 5);
        assert_eq!(v.active(), None);
    }

    #[test]
    fn test_switching_direction_swings_by_two() {
        let now = Instant::now();
        let mut v = VoteState::new(0);
        v.press(VoteDirection::Up, now);
        v.press(VoteDirection::Down, now);
        assert_eq!(v.count(), -1);
        assert_eq!(v.active(), Some(VoteDirection::Down));
        v.press(VoteDirection::Up, now);
        assert_eq!(v.count(), 1);
    }

    #[test]
    fn test_bump_highlight_expires() {
        let now = Instant::now();
        let mut v = VoteState::new(0);
        assert!(!v.is_bumped(now));
        v.press(VoteDirection::Up, now);
        assert!(v.is_bumped(now + Duration::from_millis(100)));
        assert!(!v.is_bumped(now + BUMP_DURATION));
    }
}
