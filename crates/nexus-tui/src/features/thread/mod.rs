//! Single thread view: posts, votes, code blocks and the reply box.

pub mod render;
mod state;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nexus_core::forum::Forum;
use nexus_core::widgets::progress::show_back_to_top;
use nexus_core::widgets::{ToastKind, VoteDirection, submit_reply};
pub use state::{COPIED_LABEL_DURATION, PostVotes, REPLY_BOX_HEIGHT, ThreadView};

pub const NO_CODE_MESSAGE: &str = "No code block in this post";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadAction {
    None,
    Back,
    ToggleBookmark(String),
    CopyCode(String),
    Toast(String, ToastKind),
}

pub fn handle_key(
    view: &mut ThreadView,
    key: KeyEvent,
    forum: &mut Forum,
    votes: &mut PostVotes,
    now: Instant,
) -> ThreadAction {
    if view.reply_focused {
        return handle_reply_key(view, key, forum);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return ThreadAction::None;
    }
    let page = view.viewport.max(1) as i32;
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => view.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => view.scroll_by(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => view.scroll_by(page),
        KeyCode::PageUp => view.scroll_by(-page),
        KeyCode::Home | KeyCode::Char('g') => view.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => view.scroll_to_bottom(),
        KeyCode::Char('t') if show_back_to_top(view.scroll) => view.scroll_to_top(),
        KeyCode::Tab | KeyCode::Char(']') => view.next_post(),
        KeyCode::BackTab | KeyCode::Char('[') => view.previous_post(),
        KeyCode::Char('u') | KeyCode::Char('+') => vote(view, forum, votes, VoteDirection::Up, now),
        KeyCode::Char('d') | KeyCode::Char('-') => {
            vote(view, forum, votes, VoteDirection::Down, now);
        }
        KeyCode::Char('s') => return ThreadAction::ToggleBookmark(view.thread_id.clone()),
        KeyCode::Char('c') => {
            let code = forum
                .thread(&view.thread_id)
                .and_then(|t| t.posts.get(view.selected_post))
                .and_then(|p| p.code.as_ref());
            return match code {
                Some(code) => ThreadAction::CopyCode(code.source.clone()),
                None => ThreadAction::Toast(NO_CODE_MESSAGE.to_string(), ToastKind::Info),
            };
        }
        KeyCode::Char('r') => view.reply_focused = true,
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => return ThreadAction::Back,
        _ => {}
    }
    ThreadAction::None
}

fn vote(
    view: &ThreadView,
    forum: &Forum,
    votes: &mut PostVotes,
    direction: VoteDirection,
    now: Instant,
) {
    if let Some(thread) = forum.thread(&view.thread_id) {
        votes.press(thread, view.selected_post, direction, now);
    }
}

fn handle_reply_key(view: &mut ThreadView, key: KeyEvent, forum: &mut Forum) -> ThreadAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => view.reply_focused = false,
        KeyCode::Enter => return submit(view, forum),
        KeyCode::Backspace => view.reply.backspace(),
        KeyCode::Char('w') if ctrl => view.reply.delete_word(),
        KeyCode::Char('u') if ctrl => view.reply.clear(),
        KeyCode::Char(c) if !ctrl => view.reply.push(c),
        _ => {}
    }
    ThreadAction::None
}

fn submit(view: &mut ThreadView, forum: &mut Forum) -> ThreadAction {
    match submit_reply(view.reply.value()) {
        Err(err) => ThreadAction::Toast(err.to_string(), ToastKind::Warning),
        Ok(message) => {
            if forum.add_reply(&view.thread_id, view.reply.value()).is_none() {
                tracing::warn!(thread = %view.thread_id, "Reply to unknown thread dropped");
                return ThreadAction::None;
            }
            view.reply.clear();
            view.reply_focused = false;
            ThreadAction::Toast(message.to_string(), ToastKind::Success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (Forum, ThreadView, PostVotes) {
        let forum = Forum::builtin().unwrap();
        let id = forum.threads[0].id.clone();
        let mut view = ThreadView::new(id);
        let posts = forum.threads[0].posts.len();
        view.set_geometry(200, 20, (0..posts as u32).map(|i| i * 10).collect());
        (forum, view, PostVotes::default())
    }

    fn type_text(view: &mut ThreadView, forum: &mut Forum, text: &str) {
        let mut votes = PostVotes::default();
        for c in text.chars() {
            handle_key(view, key(KeyCode::Char(c)), forum, &mut votes, Instant::now());
        }
    }

    #[test]
    fn test_short_reply_is_rejected() {
        let (mut forum, mut view, mut votes) = setup();
        handle_key(&mut view, key(KeyCode::Char('r')), &mut forum, &mut votes, Instant::now());
        assert!(view.reply_focused);
        type_text(&mut view, &mut forum, "too short");
        let action = handle_key(&mut view, key(KeyCode::Enter), &mut forum, &mut votes, Instant::now());
        assert_eq!(
            action,
            ThreadAction::Toast(
                "Reply must be at least 10 characters! ⚠️".to_string(),
                ToastKind::Warning
            )
        );
        assert_eq!(view.reply.value(), "too short");
    }

    #[test]
    fn test_reply_is_appended() {
        let (mut forum, mut view, mut votes) = setup();
        let before = forum.threads[0].posts.len();
        view.reply_focused = true;
        type_text(&mut view, &mut forum, "This is a thoughtful reply");
        let action = handle_key(&mut view, key(KeyCode::Enter), &mut forum, &mut votes, Instant::now());
        assert!(matches!(action, ThreadAction::Toast(_, ToastKind::Success)));
        assert_eq!(forum.threads[0].posts.len(), before + 1);
        assert!(view.reply.is_empty());
        assert!(!view.reply_focused);
    }

    #[test]
    fn test_copy_needs_code_block() {
        let (mut forum, mut view, mut votes) = setup();
        let with_code = forum.threads[0]
            .posts
            .iter()
            .position(|p| p.code.is_some())
            .unwrap();
        let without_code = forum.threads[0]
            .posts
            .iter()
            .position(|p| p.code.is_none())
            .unwrap();

        view.select_post(without_code);
        assert_eq!(
            handle_key(&mut view, key(KeyCode::Char('c')), &mut forum, &mut votes, Instant::now()),
            ThreadAction::Toast(NO_CODE_MESSAGE.to_string(), ToastKind::Info)
        );
        view.select_post(with_code);
        assert!(matches!(
            handle_key(&mut view, key(KeyCode::Char('c')), &mut forum, &mut votes, Instant::now()),
            ThreadAction::CopyCode(_)
        ));
    }

    #[test]
    fn test_vote_keys_update_selected_post() {
        let (mut forum, mut view, mut votes) = setup();
        let stored = forum.threads[0].posts[0].votes;
        handle_key(&mut view, key(KeyCode::Char('u')), &mut forum, &mut votes, Instant::now());
        assert_eq!(votes.count(&forum.threads[0], 0), stored + 1);
        handle_key(&mut view, key(KeyCode::Char('u')), &mut forum, &mut votes, Instant::now());
        assert_eq!(votes.count(&forum.threads[0], 0), stored);
    }

    #[test]
    fn test_back_keys_leave_thread() {
        let (mut forum, mut view, mut votes) = setup();
        assert_eq!(
            handle_key(&mut view, key(KeyCode::Char('h')), &mut forum, &mut votes, Instant::now()),
            ThreadAction::Back
        );
    }
}
