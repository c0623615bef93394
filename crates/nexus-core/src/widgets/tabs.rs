//! Single-selection tab strips and thread filters.

use std::fmt;

/// A strip of tabs with exactly one active entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabs<T> {
    items: Vec<T>,
    active: usize,
}

impl<T: PartialEq + Copy> Tabs<T> {
    /// Creates a strip with the first item active. Returns `None` when empty.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items, active: 0 })
    }

    pub fn active(&self) -> T {
        self.items[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_active(&self, item: T) -> bool {
        self.active() == item
    }

    /// Activates `item`; unknown items are ignored. Returns whether it changed.
    pub fn select(&mut self, item: T) -> bool {
        match self.items.iter().position(|candidate| *candidate == item) {
            Some(index) if index != self.active => {
                self.active = index;
                true
            }
            _ => false,
        }
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.items.len() && index != self.active {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.items.len();
    }

    pub fn previous(&mut self) {
        self.active = (self.active + self.items.len() - 1) % self.items.len();
    }
}

/// Thread list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadFilter {
    #[default]
    All,
    Latest,
    Popular,
    Unanswered,
}

impl ThreadFilter {
    pub const ALL: [ThreadFilter; 4] = [
        ThreadFilter::All,
        ThreadFilter::Latest,
        ThreadFilter::Popular,
        ThreadFilter::Unanswered,
    ];

    /// Tab strip over every filter with `All` active.
    pub fn tabs() -> Tabs<ThreadFilter> {
        Tabs {
            items: Self::ALL.to_vec(),
            active: 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreadFilter::All => "all",
            ThreadFilter::Latest => "latest",
            ThreadFilter::Popular => "popular",
            ThreadFilter::Unanswered => "unanswered",
        }
    }

    /// Toast shown when the filter is selected.
    pub fn announcement(self) -> String {
        format!("Showing {} threads 🔍", self.as_str())
    }
}

impl fmt::Display for ThreadFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tabs_rejected() {
        assert!(Tabs::<u8>::new(vec![]).is_none());
    }

    #[test]
    fn test_select_activates_exactly_one() {
        let mut tabs = Tabs::new(vec!["posts", "replies", "about"]).unwrap();
        assert!(tabs.is_active("posts"));
        assert!(tabs.select("about"));
        assert!(tabs.is_active("about"));
        assert!(!tabs.is_active("posts"));
        assert!(!tabs.select("about"));
    }

    #[test]
    fn test_unknown_tab_is_ignored() {
        let mut tabs = Tabs::new(vec![1, 2]).unwrap();
        assert!(!tabs.select(7));
        assert_eq!(tabs.active(), 1);
        assert!(!tabs.select_index(5));
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut tabs = Tabs::new(ThreadFilter::ALL.to_vec()).unwrap();
        tabs.previous();
        assert_eq!(tabs.active(), ThreadFilter::Unanswered);
        tabs.next();
        assert_eq!(tabs.active(), ThreadFilter::All);
    }

    #[test]
    fn test_filter_announcement() {
        assert_eq!(
            ThreadFilter::Popular.announcement(),
            "Showing popular threads 🔍"
        );
    }
}
