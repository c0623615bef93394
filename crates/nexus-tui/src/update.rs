//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use nexus_core::overlay::{FocusTarget, KeyChord, OverlayId, Point, ShortcutAction};
use nexus_core::widgets::konami::ACTIVATED_MESSAGE;
use nexus_core::widgets::{KonamiKey, LoadingPhase, ToastKind};

use crate::common::clipboard::{COPIED_MESSAGE, COPY_FAILED_MESSAGE};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::home::{self, HomeAction};
use crate::features::thread::{self, ThreadAction, render as thread_render};
use crate::layout::{DESKTOP_BREAKPOINT, HeaderControl, ScreenLayout, contains};
use crate::overlays::{
    LOGIN_DIALOG, OverlayAction, OverlayTransition, OverlayUpdate, SIGNUP_DIALOG,
    is_text_input,
};
use crate::state::{AppState, View};

/// Rows moved per mouse wheel step.
const WHEEL_STEP: i32 = 3;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    update_at(app, event, Instant::now())
}

/// [`update`] with an explicit clock.
pub fn update_at(app: &mut AppState, event: UiEvent, now: Instant) -> Vec<UiEffect> {
    app.now = now;
    match event {
        UiEvent::Tick => {
            handle_tick(app, now);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event, now),
        UiEvent::FocusDue(request) => {
            if app.overlays.apply_focus(&request) {
                blur_reply(app);
            }
            vec![]
        }
        UiEvent::ClipboardResult { ok } => {
            if ok {
                app.toasts.show_at(COPIED_MESSAGE, ToastKind::Success, now);
                if let Some(view) = app.thread.as_mut() {
                    view.copied = Some((view.selected_post, now));
                }
            } else {
                app.toasts.show_at(COPY_FAILED_MESSAGE, ToastKind::Error, now);
            }
            vec![]
        }
    }
}

fn handle_tick(app: &mut AppState, now: Instant) {
    app.toasts.tick(now);
    app.konami.tick(now);
    if app
        .loading
        .as_ref()
        .is_some_and(|screen| screen.phase(now) == LoadingPhase::Hidden)
    {
        app.loading = None;
    }
    if let Some((width, height)) = app.resize.poll(now) {
        tracing::debug!(width, height, "resize settled");
        if width > DESKTOP_BREAKPOINT {
            match app.overlays.close(OverlayId::NavDrawer) {
                Ok(true) => tracing::debug!("nav drawer closed at desktop width"),
                Ok(false) => {}
                Err(err) => tracing::warn!(error = %err, "closing nav drawer failed"),
            }
        }
    }
}

/// Recomputes layout and page geometry for the current terminal size.
fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    app.size = (width, height);
    app.layout = ScreenLayout::compute(width, height, app.theme, app.signed_in());
    let body = app.layout.body;

    app.home
        .relayout(&app.forum, home_width(&app.layout), body.height);
    app.home.observe(app.now);
    app.home.retarget(&app.forum.stats, app.now);

    if let Some((content_height, viewport, post_tops)) = thread_geometry(app)
        && let Some(view) = app.thread.as_mut()
    {
        view.set_geometry(content_height, viewport, post_tops);
    }
}

fn home_width(layout: &ScreenLayout) -> u16 {
    layout.body.width.saturating_sub(1)
}

fn thread_geometry(app: &AppState) -> Option<(u32, u32, Vec<u32>)> {
    let view = app.thread.as_ref()?;
    let thread = app.forum.thread(&view.thread_id)?;
    let (content, _) = thread_render::split_body(app.layout.body);
    let palette = app.palette();
    let ctx = thread_render::ThreadRender {
        forum: &app.forum,
        thread,
        view,
        votes: &app.votes,
        palette: &palette,
        bookmarked: app.bookmarks.contains(&thread.id),
        now: app.now,
        wall_clock: chrono::Utc::now(),
    };
    let page = thread_render::page(&ctx, thread_render::text_width(content));
    Some((
        page.lines.len() as u32,
        u32::from(content.height),
        page.post_tops,
    ))
}

fn handle_terminal_event(app: &mut AppState, event: Event, now: Instant) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key, now),
        Event::Mouse(mouse) => handle_mouse(app, mouse, now),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        Event::Resize(width, height) => {
            app.resize.call((width, height), now);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Vec<UiEffect> {
    if let Some(screen) = app.loading.as_mut()
        && screen.phase(now) == LoadingPhase::Showing
    {
        screen.dismiss(now);
        return vec![];
    }

    if app.konami.push(konami_key(&key), now) {
        tracing::info!("matrix mode on");
        app.toasts.show_at(ACTIVATED_MESSAGE, ToastKind::Success, now);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }

    if ctrl
        && let KeyCode::Char(c) = key.code
        && let Some(action) = app.shortcuts.lookup(shortcut_chord(c))
    {
        return run_shortcut(app, action, now);
    }

    if key.code == KeyCode::Esc {
        let closed = app.overlays.dismiss_on_escape();
        if !closed.is_empty() {
            tracing::debug!(?closed, "escape dismissed overlays");
            return vec![];
        }
        if let Some(view) = app.thread.as_mut()
            && view.reply_focused
        {
            view.reply_focused = false;
        } else if app.view == View::Thread {
            app.go_home();
        }
        return vec![];
    }

    if let Some(modal) = app.overlays.active_modal() {
        return handle_modal_key(app, modal, key, now);
    }

    if is_drawer_open(app) {
        let update = app.panels.drawer.handle_key(key);
        return apply_overlay_update(app, OverlayId::NavDrawer, update, now);
    }

    match app.view {
        View::Home => {
            let action = home::handle_key(&mut app.home, key, &app.forum, home_width(&app.layout));
            apply_home_action(app, action, now)
        }
        View::Thread => {
            let Some(view) = app.thread.as_mut() else {
                app.go_home();
                return vec![];
            };
            let action = thread::handle_key(view, key, &mut app.forum, &mut app.votes, now);
            apply_thread_action(app, action, now)
        }
    }
}

fn konami_key(key: &KeyEvent) -> KonamiKey {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return KonamiKey::Other;
    }
    match key.code {
        KeyCode::Up => KonamiKey::Up,
        KeyCode::Down => KonamiKey::Down,
        KeyCode::Left => KonamiKey::Left,
        KeyCode::Right => KonamiKey::Right,
        KeyCode::Char(c) => KonamiKey::Char(c),
        _ => KonamiKey::Other,
    }
}

/// Most terminals send Ctrl+/ as Ctrl+7.
fn shortcut_chord(c: char) -> KeyChord {
    match c {
        '7' | '_' => KeyChord::ctrl('/'),
        other => KeyChord::ctrl(other),
    }
}

fn run_shortcut(app: &mut AppState, action: ShortcutAction, now: Instant) -> Vec<UiEffect> {
    match action {
        ShortcutAction::Open(id) => open_overlay(app, id),
        ShortcutAction::Toggle(id) => toggle_overlay(app, id),
        ShortcutAction::ToggleTheme => toggle_theme(app, now),
    }
}

fn handle_modal_key(
    app: &mut AppState,
    modal: OverlayId,
    key: KeyEvent,
    now: Instant,
) -> Vec<UiEffect> {
    if is_text_input(&key) && app.overlays.focused().is_none() {
        focus_panel(app, modal);
    }
    let update = match modal {
        OverlayId::Search => app.panels.search.handle_key(key, &app.forum),
        OverlayId::CreateThread => app
            .panels
            .create_thread
            .handle_key(key, &app.forum.categories),
        LOGIN_DIALOG => app.panels.login.handle_key(key),
        SIGNUP_DIALOG => app.panels.signup.handle_key(key),
        OverlayId::NavDrawer | OverlayId::Dialog(_) => OverlayUpdate::stay(),
    };
    apply_overlay_update(app, modal, update, now)
}

/// Focuses the overlay's registered target right away.
fn focus_panel(app: &mut AppState, id: OverlayId) {
    let Some(target) = focus_target(app, id) else {
        return;
    };
    if let Err(err) = app.overlays.focus_now(id, target) {
        tracing::warn!(error = %err, "focus failed");
    }
    blur_reply(app);
}

fn focus_target(app: &AppState, id: OverlayId) -> Option<FocusTarget> {
    app.overlays
        .spec(id)
        .ok()
        .and_then(|spec| spec.focus_target)
}

fn blur_reply(app: &mut AppState) {
    if let Some(view) = app.thread.as_mut() {
        view.reply_focused = false;
    }
}

fn is_drawer_open(app: &AppState) -> bool {
    app.overlays.is_open(OverlayId::NavDrawer).unwrap_or(false)
}

fn open_overlay(app: &mut AppState, id: OverlayId) -> Vec<UiEffect> {
    if !app.overlays.is_open(id).unwrap_or(true) {
        app.panels.reset(id);
    }
    match app.overlays.open(id) {
        Ok(outcome) => {
            if !outcome.displaced.is_empty() {
                tracing::debug!(overlay = %id, displaced = ?outcome.displaced, "modal replaced");
            }
            app.hover = None;
            outcome
                .focus
                .map(UiEffect::ScheduleFocus)
                .into_iter()
                .collect()
        }
        Err(err) => {
            tracing::warn!(error = %err, "open failed");
            vec![]
        }
    }
}

fn close_overlay(app: &mut AppState, id: OverlayId) {
    if let Err(err) = app.overlays.close(id) {
        tracing::warn!(error = %err, "close failed");
    }
}

fn toggle_overlay(app: &mut AppState, id: OverlayId) -> Vec<UiEffect> {
    match app.overlays.is_open(id) {
        Ok(true) => {
            close_overlay(app, id);
            vec![]
        }
        Ok(false) => open_overlay(app, id),
        Err(err) => {
            tracing::warn!(error = %err, "toggle failed");
            vec![]
        }
    }
}

fn toggle_theme(app: &mut AppState, now: Instant) -> Vec<UiEffect> {
    app.theme = app.theme.toggled();
    app.toasts
        .show_at(app.theme.activated_message(), ToastKind::Info, now);
    vec![UiEffect::PersistTheme(app.theme)]
}

fn toggle_bookmark(app: &mut AppState, thread_id: &str, now: Instant) -> Vec<UiEffect> {
    let message = app.bookmarks.toggle(thread_id);
    let kind = if app.bookmarks.contains(thread_id) {
        ToastKind::Success
    } else {
        ToastKind::Info
    };
    app.toasts.show_at(message, kind, now);
    vec![UiEffect::PersistBookmarks]
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    app.should_quit = true;
    vec![UiEffect::Quit]
}

/// Applies a panel's toast, transition and action, in that order.
fn apply_overlay_update(
    app: &mut AppState,
    id: OverlayId,
    update: OverlayUpdate,
    now: Instant,
) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if let Some((message, kind)) = update.toast {
        app.toasts.show_at(message, kind, now);
    }
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => close_overlay(app, id),
        OverlayTransition::Open(next) => {
            close_overlay(app, id);
            effects.extend(open_overlay(app, next));
        }
    }
    let Some(action) = update.action else {
        return effects;
    };
    match action {
        OverlayAction::OpenThread(thread_id) => {
            app.open_thread(&thread_id);
        }
        OverlayAction::CreateThread(form) => {
            let thread_id = app.forum.add_thread(&form);
            tracing::info!(thread = %thread_id, "thread created");
            app.open_thread(&thread_id);
        }
        OverlayAction::SignedIn(username) => {
            tracing::info!(user = %username, "signed in");
            app.user = Some(username);
        }
        OverlayAction::ToggleTheme => effects.extend(toggle_theme(app, now)),
        OverlayAction::GoHome => app.go_home(),
        OverlayAction::Quit => effects.extend(quit(app)),
    }
    effects
}

fn apply_home_action(app: &mut AppState, action: HomeAction, now: Instant) -> Vec<UiEffect> {
    match action {
        HomeAction::None => vec![],
        HomeAction::OpenThread(thread_id) => {
            app.open_thread(&thread_id);
            vec![]
        }
        HomeAction::FilterChanged(filter) => {
            app.toasts
                .show_at(filter.announcement(), ToastKind::Info, now);
            vec![]
        }
        HomeAction::ToggleBookmark(thread_id) => toggle_bookmark(app, &thread_id, now),
        HomeAction::OpenOverlay(id) => open_overlay(app, id),
        HomeAction::Quit => quit(app),
    }
}

fn apply_thread_action(app: &mut AppState, action: ThreadAction, now: Instant) -> Vec<UiEffect> {
    match action {
        ThreadAction::None => vec![],
        ThreadAction::Back => {
            app.go_home();
            vec![]
        }
        ThreadAction::ToggleBookmark(thread_id) => toggle_bookmark(app, &thread_id, now),
        ThreadAction::CopyCode(text) => vec![UiEffect::CopyToClipboard { text }],
        ThreadAction::Toast(message, kind) => {
            app.toasts.show_at(message, kind, now);
            vec![]
        }
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Instant) -> Vec<UiEffect> {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved => {
            app.hover = app.layout.control_at(col, row);
            vec![]
        }
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, col, row, now),
        MouseEventKind::ScrollDown => {
            handle_wheel(app, col, row, WHEEL_STEP);
            vec![]
        }
        MouseEventKind::ScrollUp => {
            handle_wheel(app, col, row, -WHEEL_STEP);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_click(app: &mut AppState, col: u16, row: u16, now: Instant) -> Vec<UiEffect> {
    if let Some(screen) = app.loading.as_mut()
        && screen.phase(now) == LoadingPhase::Showing
    {
        screen.dismiss(now);
        return vec![];
    }

    let control = app.layout.control_at(col, row);
    let modal = app.overlays.active_modal();
    let drawer_was_open = is_drawer_open(app);
    let closed = app
        .overlays
        .dismiss_on_click(Point::new(col, row), &app.layout.hits);
    if !closed.is_empty() {
        tracing::debug!(?closed, "outside click dismissed overlays");
    }

    if let Some(modal) = modal {
        if closed.contains(&modal) {
            return vec![];
        }
        if control.and_then(HeaderControl::overlay) == Some(modal) {
            // own trigger re-opens, never closes
            return open_overlay(app, modal);
        }
        if contains(app.layout.surface(modal), col, row) {
            focus_panel(app, modal);
        }
        return vec![];
    }

    if drawer_was_open && contains(app.layout.drawer, col, row) {
        let update = app.panels.drawer.click(app.layout.drawer, row);
        return apply_overlay_update(app, OverlayId::NavDrawer, update, now);
    }

    if let Some(control) = control {
        return activate_control(app, control, now);
    }
    if !closed.is_empty() {
        return vec![];
    }

    let body = app.layout.body;
    if !contains(body, col, row) {
        return vec![];
    }
    match app.view {
        View::Home => {
            let action = home::handle_click(
                &mut app.home,
                col - body.x,
                row - body.y,
                &app.forum,
                home_width(&app.layout),
            );
            apply_home_action(app, action, now)
        }
        View::Thread => {
            let (_, reply) = thread_render::split_body(body);
            if let Some(view) = app.thread.as_mut() {
                view.reply_focused = contains(reply, col, row);
            }
            vec![]
        }
    }
}

fn activate_control(app: &mut AppState, control: HeaderControl, now: Instant) -> Vec<UiEffect> {
    match control {
        HeaderControl::Menu => toggle_overlay(app, OverlayId::NavDrawer),
        HeaderControl::Theme => toggle_theme(app, now),
        other => match other.overlay() {
            Some(id) => open_overlay(app, id),
            None => vec![],
        },
    }
}

fn handle_wheel(app: &mut AppState, col: u16, row: u16, delta: i32) {
    if app.overlays.scroll_locked() {
        if app.overlays.active_modal() == Some(OverlayId::Search)
            && contains(app.layout.search, col, row)
        {
            if delta > 0 {
                app.panels.search.select_next(&app.forum);
            } else {
                app.panels.search.select_previous();
            }
        }
        return;
    }
    match (app.view, app.thread.as_mut()) {
        (View::Thread, Some(view)) => view.scroll_by(delta),
        _ => app.home.scroll_by(delta),
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(modal) = app.overlays.active_modal() {
        focus_panel(app, modal);
        match modal {
            OverlayId::Search => app.panels.search.paste(text),
            OverlayId::CreateThread => app.panels.create_thread.paste(text),
            LOGIN_DIALOG => app.panels.login.paste(text),
            SIGNUP_DIALOG => app.panels.signup.paste(text),
            OverlayId::NavDrawer | OverlayId::Dialog(_) => {}
        }
        return;
    }
    if let Some(view) = app.thread.as_mut()
        && view.reply_focused
    {
        view.reply.paste(text);
    }
}
