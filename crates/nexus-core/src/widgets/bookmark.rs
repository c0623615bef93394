//! Saved-thread bookmarks.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::prefs::PreferenceStore;

pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Set of bookmarked thread ids, persisted as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    saved: BTreeSet<String>,
}

impl Bookmarks {
    pub fn load(store: &PreferenceStore) -> Self {
        let saved = store.get_json::<BTreeSet<String>>(BOOKMARKS_KEY);
        Self {
            saved: saved.unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &mut PreferenceStore) -> Result<()> {
        store.set_json(BOOKMARKS_KEY, &self.saved)
    }

    pub fn contains(&self, thread_id: &str) -> bool {
        self.saved.contains(thread_id)
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.saved.iter().map(String::as_str)
    }

    /// Flips the bookmark and returns the toast message for the new state.
    pub fn toggle(&mut self, thread_id: &str) -> &'static str {
        if self.saved.remove(thread_id) {
            "Removed from saved 🗑️"
        } else {
            self.saved.insert(thread_id.to_string());
            "Saved! 📌"
        }
    }
}
