use std::time::{Duration, Instant};

use nexus_core::forum::{Forum, Stats};
use nexus_core::widgets::reveal::{CONTENT_THRESHOLD, COUNTER_THRESHOLD, visible_fraction};
use nexus_core::widgets::{CounterAnimation, RevealTracker, Tabs, ThreadFilter};

pub const HERO_HEIGHT: u32 = 6;
pub const STATS_HEIGHT: u32 = 4;
pub const CATEGORY_HEIGHT: u32 = 3;
pub const THREAD_ROW_HEIGHT: u32 = 3;
/// Header row plus filter tab row above the thread list.
pub const THREADS_HEADER_HEIGHT: u32 = 3;
/// Width from which categories are laid out in two columns.
pub const TWO_COLUMN_WIDTH: u16 = 80;
/// Sections reveal once they clear this many rows above the bottom edge.
const REVEAL_MARGIN: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeSection {
    Hero,
    Stats,
    Categories,
    Threads,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: HomeSection,
    pub top: u32,
    pub height: u32,
}

/// Row geometry of the scrollable home page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeGeometry {
    pub spans: Vec<SectionSpan>,
    pub category_columns: u16,
    /// First row of the first thread entry.
    pub threads_top: u32,
    pub thread_count: usize,
    pub content_height: u32,
}

impl HomeGeometry {
    pub fn compute(forum: &Forum, filter: ThreadFilter, width: u16) -> Self {
        let category_columns = if width >= TWO_COLUMN_WIDTH { 2 } else { 1 };
        let category_rows = (forum.categories.len() as u32).div_ceil(u32::from(category_columns));
        let thread_count = forum.filtered(filter).len();

        let mut spans = Vec::with_capacity(4);
        let mut top = 0;
        for (section, height) in [
            (HomeSection::Hero, HERO_HEIGHT),
            (HomeSection::Stats, STATS_HEIGHT),
            (HomeSection::Categories, 1 + category_rows * CATEGORY_HEIGHT),
            (
                HomeSection::Threads,
                THREADS_HEADER_HEIGHT + (thread_count.max(1) as u32) * THREAD_ROW_HEIGHT,
            ),
        ] {
            spans.push(SectionSpan {
                section,
                top,
                height,
            });
            top += height + 1;
        }

        let threads = spans[3];
        Self {
            threads_top: threads.top + THREADS_HEADER_HEIGHT,
            spans,
            category_columns,
            thread_count,
            content_height: top,
        }
    }

    pub fn span(&self, section: HomeSection) -> Option<SectionSpan> {
        self.spans.iter().copied().find(|s| s.section == section)
    }

    pub fn thread_top(&self, index: usize) -> u32 {
        self.threads_top + index as u32 * THREAD_ROW_HEIGHT
    }

    /// Content row of the filter tab strip.
    pub fn filter_row(&self) -> u32 {
        self.threads_top.saturating_sub(2)
    }
}

#[derive(Debug, Clone)]
pub struct HomeState {
    pub filters: Tabs<ThreadFilter>,
    pub selected: usize,
    pub scroll: u32,
    pub viewport: u32,
    /// Members, threads, posts, online.
    pub counters: [CounterAnimation; 4],
    pub reveal: RevealTracker<HomeSection>,
    pub geometry: HomeGeometry,
    counter_duration: Duration,
}

impl HomeState {
    pub fn new(stats: &Stats, counter_duration: Duration) -> Self {
        let mut reveal = RevealTracker::new();
        reveal.observe(HomeSection::Hero, CONTENT_THRESHOLD);
        reveal.observe(HomeSection::Stats, COUNTER_THRESHOLD);
        reveal.observe(HomeSection::Categories, CONTENT_THRESHOLD);
        reveal.observe(HomeSection::Threads, CONTENT_THRESHOLD);
        Self {
            filters: ThreadFilter::tabs(),
            selected: 0,
            scroll: 0,
            viewport: 0,
            counters: counters_for(stats, counter_duration),
            reveal,
            geometry: HomeGeometry::default(),
            counter_duration,
        }
    }

    pub fn filter(&self) -> ThreadFilter {
        self.filters.active()
    }

    /// Recomputes geometry for the current width and viewport height.
    pub fn relayout(&mut self, forum: &Forum, width: u16, viewport: u16) {
        self.geometry = HomeGeometry::compute(forum, self.filter(), width);
        self.viewport = u32::from(viewport);
        self.selected = self
            .selected
            .min(self.geometry.thread_count.saturating_sub(1));
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Feeds section visibility to the reveal tracker. Counters start the
    /// first time the stats band is half visible.
    pub fn observe(&mut self, now: Instant) {
        for span in self.geometry.spans.clone() {
            let fraction = visible_fraction(
                span.top,
                span.height,
                self.scroll,
                self.viewport,
                REVEAL_MARGIN,
            );
            if self.reveal.update(&span.section, fraction) {
                tracing::trace!(section = ?span.section, "section revealed");
                if span.section == HomeSection::Stats {
                    for counter in &mut self.counters {
                        counter.start(now);
                    }
                }
            }
        }
    }

    /// Keeps counters in step with stats that changed at runtime.
    pub fn retarget(&mut self, stats: &Stats, now: Instant) {
        let fresh = counters_for(stats, self.counter_duration);
        for (counter, replacement) in self.counters.iter_mut().zip(fresh) {
            if counter.target() == replacement.target() {
                continue;
            }
            let started = counter.is_started();
            *counter = replacement;
            if started {
                counter.start(now.checked_sub(self.counter_duration).unwrap_or(now));
            }
        }
    }

    pub fn is_revealed(&self, section: HomeSection) -> bool {
        self.reveal.is_revealed(&section)
    }

    pub fn max_scroll(&self) -> u32 {
        self.geometry.content_height.saturating_sub(self.viewport)
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

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.geometry.thread_count {
            self.selected += 1;
        }
        self.ensure_selected_visible();
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        if self.geometry.thread_count == 0 {
            return;
        }
        let top = self.geometry.thread_top(self.selected);
        let bottom = top + THREAD_ROW_HEIGHT;
        if top < self.scroll {
            self.scroll = top;
        } else if bottom > self.scroll + self.viewport {
            self.scroll = bottom.saturating_sub(self.viewport);
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Activates `filter`; returns false when it was already active.
    pub fn select_filter(&mut self, forum: &Forum, filter: ThreadFilter, width: u16) -> bool {
        if self.filters.is_active(filter) {
            return false;
        }
        self.filters.select(filter);
        self.selected = 0;
        self.geometry = HomeGeometry::compute(forum, filter, width);
        self.scroll = self.scroll.min(self.max_scroll());
        true
    }

    pub fn selected_thread_id(&self, forum: &Forum) -> Option<String> {
        forum
            .filtered(self.filter())
            .get(self.selected)
            .map(|t| t.id.clone())
    }

    /// Thread entry under body row `row`.
    pub fn thread_at_row(&self, row: u16) -> Option<usize> {
        let content_row = self.scroll + u32::from(row);
        let first = self.geometry.threads_top;
        if content_row < first {
            return None;
        }
        let index = ((content_row - first) / THREAD_ROW_HEIGHT) as usize;
        (index < self.geometry.thread_count).then_some(index)
    }

    /// Filter tab under body position (`col`, `row`).
    pub fn filter_at(&self, col: u16, row: u16) -> Option<ThreadFilter> {
        if self.scroll + u32::from(row) != self.geometry.filter_row() {
            return None;
        }
        filter_tab_spans()
            .find(|(_, start, width)| col >= *start && col < start + width)
            .map(|(filter, _, _)| filter)
    }
}

fn counters_for(stats: &Stats, duration: Duration) -> [CounterAnimation; 4] {
    [stats.members, stats.threads, stats.posts, stats.online]
        .map(|target| CounterAnimation::new(target, duration))
}

/// Column span of each filter tab: `(filter, start, width)`.
pub fn filter_tab_spans() -> impl Iterator<Item = (ThreadFilter, u16, u16)> {
    let mut x = 2u16;
    ThreadFilter::ALL.into_iter().map(move |filter| {
        let width = filter.as_str().len() as u16 + 2;
        let start = x;
        x += width + 1;
        (filter, start, width)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home(forum: &Forum) -> HomeState {
        let mut home = HomeState::new(&forum.stats, Duration::from_millis(2000));
        home.relayout(forum, 120, 20);
        home
    }

    #[test]
    fn test_geometry_stacks_sections() {
        let forum = Forum::builtin().unwrap();
        let geometry = HomeGeometry::compute(&forum, ThreadFilter::All, 120);
        assert_eq!(geometry.category_columns, 2);
        let stats = geometry.span(HomeSection::Stats).unwrap();
        assert_eq!(stats.top, HERO_HEIGHT + 1);
        assert_eq!(geometry.thread_count, forum.threads.len());
        assert!(geometry.content_height > geometry.thread_top(geometry.thread_count - 1));
    }

    #[test]
    fn test_narrow_width_uses_one_column() {
        let forum = Forum::builtin().unwrap();
        let wide = HomeGeometry::compute(&forum, ThreadFilter::All, 120);
        let narrow = HomeGeometry::compute(&forum, ThreadFilter::All, 60);
        assert_eq!(narrow.category_columns, 1);
        assert!(narrow.content_height > wide.content_height);
    }

    #[test]
    fn test_counters_start_when_stats_revealed() {
        let forum = Forum::builtin().unwrap();
        let mut home = HomeState::new(&forum.stats, Duration::from_millis(2000));
        home.relayout(&forum, 120, 5);
        let now = Instant::now();
        home.observe(now);
        assert!(home.is_revealed(HomeSection::Hero));
        assert!(!home.counters[0].is_started());

        home.scroll_by(6);
        home.observe(now);
        assert!(home.is_revealed(HomeSection::Stats));
        assert!(home.counters.iter().all(CounterAnimation::is_started));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let forum = Forum::builtin().unwrap();
        let mut home = home(&forum);
        for _ in 0..forum.threads.len() + 2 {
            home.select_next();
        }
        assert_eq!(home.selected, forum.threads.len() - 1);
        let bottom = home.geometry.thread_top(home.selected) + THREAD_ROW_HEIGHT;
        assert!(bottom <= home.scroll + home.viewport);

        for _ in 0..forum.threads.len() {
            home.select_previous();
        }
        assert_eq!(home.selected, 0);
        assert!(home.geometry.thread_top(0) >= home.scroll);
    }

    #[test]
    fn test_select_filter_resets_selection() {
        let forum = Forum::builtin().unwrap();
        let mut home = home(&forum);
        home.selected = 2;
        assert!(home.select_filter(&forum, ThreadFilter::Unanswered, 120));
        assert_eq!(home.selected, 0);
        assert_eq!(
            home.geometry.thread_count,
            forum.filtered(ThreadFilter::Unanswered).len()
        );
        assert!(!home.select_filter(&forum, ThreadFilter::Unanswered, 120));
    }

    #[test]
    fn test_thread_at_row_maps_scrolled_rows() {
        let forum = Forum::builtin().unwrap();
        let mut home = home(&forum);
        home.scroll = home.geometry.threads_top;
        assert_eq!(home.thread_at_row(0), Some(0));
        assert_eq!(home.thread_at_row(3), Some(1));
        home.scroll = 0;
        assert_eq!(home.thread_at_row(0), None);
    }

    #[test]
    fn test_filter_at_matches_tab_columns() {
        let forum = Forum::builtin().unwrap();
        let mut home = home(&forum);
        home.scroll = home.geometry.filter_row();
        let (_, start, _) = filter_tab_spans().nth(2).unwrap();
        assert_eq!(home.filter_at(start, 0), Some(ThreadFilter::Popular));
        assert_eq!(home.filter_at(0, 0), None);
        assert_eq!(home.filter_at(start, 1), None);
    }

    #[test]
    fn test_retarget_updates_changed_counters() {
        let forum = Forum::builtin().unwrap();
        let mut home = home(&forum);
        let now = Instant::now();
        let mut stats = forum.stats.clone();
        stats.threads += 1;
        home.retarget(&stats, now);
        assert_eq!(home.counters[1].target(), stats.threads);
        assert_eq!(home.counters[0].target(), stats.members);
    }
}
