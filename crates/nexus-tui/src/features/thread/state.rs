use std::collections::HashMap;
use std::time::{Duration, Instant};

use nexus_core::forum::Thread;
use nexus_core::widgets::progress::reading_progress;
use nexus_core::widgets::{VoteDirection, VoteState};

use crate::common::TextField;

/// How long the "Copied!" label stays on a code block.
pub const COPIED_LABEL_DURATION: Duration = Duration::from_millis(2000);
/// Rows reserved under the thread for the reply box.
pub const REPLY_BOX_HEIGHT: u16 = 3;

/// Session vote state per `(thread id, post index)`.
#[derive(Debug, Clone, Default)]
pub struct PostVotes {
    votes: HashMap<(String, usize), VoteState>,
}

impl PostVotes {
    pub fn get(&self, thread_id: &str, post: usize) -> Option<&VoteState> {
        self.votes.get(&(thread_id.to_string(), post))
    }

    /// Count shown for a post: session state if voted, else the stored count.
    pub fn count(&self, thread: &Thread, post: usize) -> i64 {
        self.get(&thread.id, post).map_or_else(
            || thread.posts.get(post).map_or(0, |p| p.votes),
            VoteState::count,
        )
    }

    pub fn press(&mut self, thread: &Thread, post: usize, direction: VoteDirection, now: Instant) {
        let initial = thread.posts.get(post).map_or(0, |p| p.votes);
        self.votes
            .entry((thread.id.clone(), post))
            .or_insert_with(|| VoteState::new(initial))
            .press(direction, now);
    }
}

#[derive(Debug, Clone)]
pub struct ThreadView {
    pub thread_id: String,
    pub scroll: u32,
    pub selected_post: usize,
    pub reply: TextField,
    pub reply_focused: bool,
    /// Rendered line count of the thread at the current width.
    pub content_height: u32,
    pub viewport: u32,
    /// First content line of each post.
    pub post_tops: Vec<u32>,
    /// Post whose code block was just copied.
    pub copied: Option<(usize, Instant)>,
}

impl ThreadView {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            scroll: 0,
            selected_post: 0,
            reply: TextField::with_max_len(2000),
            reply_focused: false,
            content_height: 0,
            viewport: 0,
            post_tops: Vec::new(),
            copied: None,
        }
    }

    pub fn set_geometry(&mut self, content_height: u32, viewport: u32, post_tops: Vec<u32>) {
        self.content_height = content_height;
        self.viewport = viewport;
        self.post_tops = post_tops;
        self.selected_post = self
            .selected_post
            .min(self.post_tops.len().saturating_sub(1));
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn max_scroll(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn progress(&self) -> u8 {
        reading_progress(self.scroll, self.content_height, self.viewport)
    }

    pub fn select_post(&mut self, index: usize) {
        if index >= self.post_tops.len() {
            return;
        }
        self.selected_post = index;
        self.scroll = self.post_tops[index].min(self.max_scroll());
    }

    pub fn next_post(&mut self) {
        self.select_post(self.selected_post + 1);
    }

    pub fn previous_post(&mut self) {
        if self.selected_post > 0 {
            self.select_post(self.selected_post - 1);
        }
    }

    pub fn copied_label_visible(&self, post: usize, now: Instant) -> bool {
        self.copied.is_some_and(|(copied, at)| {
            copied == post && now.saturating_duration_since(at) < COPIED_LABEL_DURATION
        })
    }
}

#[cfg(test)]
mod tests {
    use nexus_core::forum::Forum;

    use super::*;

    #[test]
    fn test_votes_start_from_stored_count() {
        let forum = Forum::builtin().unwrap();
        let thread = &forum.threads[0];
        let stored = thread.posts[0].votes;
        let mut votes = PostVotes::default();
        assert_eq!(votes.count(thread, 0), stored);

        let now = Instant::now();
        votes.press(thread, 0, VoteDirection::Up, now);
        assert_eq!(votes.count(thread, 0), stored + 1);
        votes.press(thread, 0, VoteDirection::Down, now);
        assert_eq!(votes.count(thread, 0), stored - 1);
        votes.press(thread, 0, VoteDirection::Down, now);
        assert_eq!(votes.count(thread, 0), stored);
    }

    #[test]
    fn test_select_post_scrolls_to_it() {
        let mut view = ThreadView::new("t");
        view.set_geometry(100, 20, vec![0, 30, 70]);
        view.next_post();
        assert_eq!(view.selected_post, 1);
        assert_eq!(view.scroll, 30);
        view.next_post();
        assert_eq!(view.scroll, 70.min(view.max_scroll()));
        view.next_post();
        assert_eq!(view.selected_post, 2);
        view.previous_post();
        assert_eq!(view.selected_post, 1);
    }

    #[test]
    fn test_progress_tracks_scroll() {
        let mut view = ThreadView::new("t");
        view.set_geometry(120, 20, vec![0]);
        assert_eq!(view.progress(), 0);
        view.scroll_by(50);
        assert_eq!(view.progress(), 50);
        view.scroll_to_bottom();
        assert_eq!(view.progress(), 100);
    }

    #[test]
    fn test_copied_label_expires() {
        let mut view = ThreadView::new("t");
        let now = Instant::now();
        view.copied = Some((1, now));
        assert!(view.copied_label_visible(1, now));
        assert!(!view.copied_label_visible(0, now));
        assert!(!view.copied_label_visible(1, now + COPIED_LABEL_DURATION));
    }
}
