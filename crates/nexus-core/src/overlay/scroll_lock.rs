//! Reference-counted background scroll lock.

/// Page scroll is suppressed while at least one holder remains.
///
/// Each overlay that blocks background scroll acquires once on its
/// Closed→Open transition and releases once on Open→Closed, so one overlay
/// closing never unlocks the page while another blocking overlay is open.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollLock {
    count: usize,
}

impl ScrollLock {
    pub fn acquire(&mut self) {
        self.count += 1;
    }

    pub fn release(&mut self) {
        if self.count == 0 {
            tracing::debug!("scroll lock released with no holders");
            return;
        }
        self.count -= 1;
    }

    pub fn is_locked(&self) -> bool {
        self.count > 0
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_held_until_last_release() {
        let mut lock = ScrollLock::default();
        lock.acquire();
        lock.acquire();
        lock.release();
        assert!(lock.is_locked());
        lock.release();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_release_without_holders_saturates() {
        let mut lock = ScrollLock::default();
        lock.release();
        assert_eq!(lock.count(), 0);
        lock.acquire();
        assert!(lock.is_locked());
    }
}
