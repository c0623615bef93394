//! Home page: hero, community stats, categories and the filtered thread list.

pub mod render;
mod state;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nexus_core::forum::Forum;
use nexus_core::overlay::OverlayId;
use nexus_core::widgets::ThreadFilter;
use nexus_core::widgets::progress::show_back_to_top;
pub use state::{HomeGeometry, HomeSection, HomeState, filter_tab_spans};

/// Page-level outcome of a key press on the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    None,
    OpenThread(String),
    FilterChanged(ThreadFilter),
    ToggleBookmark(String),
    OpenOverlay(OverlayId),
    Quit,
}

pub fn handle_key(home: &mut HomeState, key: KeyEvent, forum: &Forum, width: u16) -> HomeAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return HomeAction::None;
    }
    let page = home.viewport.max(1) as i32;
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => home.select_next(),
        KeyCode::Up | KeyCode::Char('k') => home.select_previous(),
        KeyCode::Enter | KeyCode::Char('l') => {
            if let Some(id) = home.selected_thread_id(forum) {
                return HomeAction::OpenThread(id);
            }
        }
        KeyCode::Right | KeyCode::Char(']') => {
            let mut tabs = home.filters.clone();
            tabs.next();
            return select_filter(home, forum, tabs.active(), width);
        }
        KeyCode::Left | KeyCode::Char('[') => {
            let mut tabs = home.filters.clone();
            tabs.previous();
            return select_filter(home, forum, tabs.active(), width);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as usize) - ('1' as usize);
            return select_filter(home, forum, ThreadFilter::ALL[index], width);
        }
        KeyCode::Char('s') => {
            if let Some(id) = home.selected_thread_id(forum) {
                return HomeAction::ToggleBookmark(id);
            }
        }
        KeyCode::PageDown | KeyCode::Char(' ') => home.scroll_by(page),
        KeyCode::PageUp => home.scroll_by(-page),
        KeyCode::Home | KeyCode::Char('g') => home.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => home.scroll_by(i32::MAX),
        KeyCode::Char('t') if show_back_to_top(home.scroll) => home.scroll_to_top(),
        KeyCode::Char('/') => return HomeAction::OpenOverlay(OverlayId::Search),
        KeyCode::Char('n') => return HomeAction::OpenOverlay(OverlayId::CreateThread),
        KeyCode::Char('q') => return HomeAction::Quit,
        _ => {}
    }
    HomeAction::None
}

fn select_filter(
    home: &mut HomeState,
    forum: &Forum,
    filter: ThreadFilter,
    width: u16,
) -> HomeAction {
    if home.select_filter(forum, filter, width) {
        HomeAction::FilterChanged(filter)
    } else {
        HomeAction::None
    }
}

/// Click at body-relative (`col`, `row`).
pub fn handle_click(
    home: &mut HomeState,
    col: u16,
    row: u16,
    forum: &Forum,
    width: u16,
) -> HomeAction {
    if let Some(filter) = home.filter_at(col, row) {
        return select_filter(home, forum, filter, width);
    }
    if let Some(index) = home.thread_at_row(row) {
        home.selected = index;
        if let Some(id) = home.selected_thread_id(forum) {
            return HomeAction::OpenThread(id);
        }
    }
    HomeAction::None
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (Forum, HomeState) {
        let forum = Forum::builtin().unwrap();
        let mut home = HomeState::new(&forum.stats, Duration::from_millis(2000));
        home.relayout(&forum, 120, 30);
        (forum, home)
    }

    #[test]
    fn test_enter_opens_selected_thread() {
        let (forum, mut home) = setup();
        handle_key(&mut home, key(KeyCode::Down), &forum, 120);
        let expected = forum.filtered(ThreadFilter::All)[1].id.clone();
        assert_eq!(
            handle_key(&mut home, key(KeyCode::Enter), &forum, 120),
            HomeAction::OpenThread(expected)
        );
    }

    #[test]
    fn test_number_keys_pick_filters() {
        let (forum, mut home) = setup();
        assert_eq!(
            handle_key(&mut home, key(KeyCode::Char('3')), &forum, 120),
            HomeAction::FilterChanged(ThreadFilter::Popular)
        );
        assert_eq!(
            handle_key(&mut home, key(KeyCode::Char('3')), &forum, 120),
            HomeAction::None
        );
        assert_eq!(
            handle_key(&mut home, key(KeyCode::Right), &forum, 120),
            HomeAction::FilterChanged(ThreadFilter::Unanswered)
        );
    }

    #[test]
    fn test_back_to_top_needs_offset() {
        let (forum, mut home) = setup();
        home.relayout(&forum, 120, 5);
        home.scroll = 10;
        handle_key(&mut home, key(KeyCode::Char('t')), &forum, 120);
        assert_eq!(home.scroll, 10);
        home.scroll = 31;
        handle_key(&mut home, key(KeyCode::Char('t')), &forum, 120);
        assert_eq!(home.scroll, 0);
    }

    #[test]
    fn test_click_on_thread_row_opens_it() {
        let (forum, mut home) = setup();
        home.scroll = home.geometry.threads_top;
        let expected = forum.filtered(ThreadFilter::All)[1].id.clone();
        assert_eq!(
            handle_click(&mut home, 10, 4, &forum, 120),
            HomeAction::OpenThread(expected)
        );
        assert_eq!(home.selected, 1);
    }
}
