//! Pure view functions.
//!
//! Everything here takes `&AppState` and draws; geometry comes from the
//! `ScreenLayout` the reducer computed for this frame, so what is drawn
//! always matches what mouse handling hit-tests against.

use chrono::Utc;
use nexus_core::overlay::OverlayId;
use nexus_core::widgets::LoadingPhase;
use nexus_core::widgets::progress::{header_elevated, show_back_to_top};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{Palette, truncate_with_ellipsis};
use crate::features::home::render::{self as home_render, HomeView};
use crate::features::thread::render::{self as thread_render, ThreadRender};
use crate::layout::HeaderControl;
use crate::overlays::{LOGIN_DIALOG, SIGNUP_DIALOG};
use crate::state::{AppState, View};

const LOGO: &str = "◆ NEXUS";

/// Renders the whole screen.
pub fn render(app: &AppState, frame: &mut Frame) {
    let palette = app.palette();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    render_header(app, frame, &palette);
    render_progress(app, frame, &palette);
    render_body(app, frame, &palette);
    render_footer(app, frame, &palette);
    render_overlays(app, frame, &palette);
    render_tooltip(app, frame, &palette);
    render_toast(app, frame, &palette);
    render_loading(app, frame, &palette);
}

fn render_header(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let header = app.layout.header;
    if header.height == 0 {
        return;
    }
    let elevated = header_elevated(app.page_scroll());
    let border = if elevated {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };
    let mut block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(border);
    if elevated {
        block = block.style(Style::default().bg(palette.surface));
    }
    frame.render_widget(block, header);

    let row = header.y + header.height / 2;
    let logo_x = app
        .layout
        .controls
        .first()
        .map_or(header.x + 1, |(_, rect)| rect.x + rect.width + 1);
    let mut logo = vec![Span::styled(
        LOGO,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = &app.user {
        logo.push(Span::styled(
            format!("  ● {user}"),
            Style::default().fg(palette.success),
        ));
    }
    let logo_width = header.width.saturating_sub(logo_x);
    frame.render_widget(
        Paragraph::new(Line::from(logo)),
        Rect::new(logo_x, row, logo_width, 1),
    );

    for (control, rect) in &app.layout.controls {
        let hovered = app.hover == Some(*control);
        let active = control
            .overlay()
            .is_some_and(|id| app.overlays.is_open(id).unwrap_or(false));
        let style = if hovered || active {
            Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else if *control == HeaderControl::Signup {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {} ", control.label(app.theme)),
                style,
            )),
            *rect,
        );
    }
}

/// Reading progress across the thin bar under the header.
fn render_progress(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let area = app.layout.progress;
    if area.height == 0 {
        return;
    }
    let Some(view) = app.thread.as_ref().filter(|_| app.view == View::Thread) else {
        return;
    };
    let filled = usize::from(area.width) * usize::from(view.progress()) / 100;
    let rest = usize::from(area.width) - filled;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("━".repeat(filled), Style::default().fg(palette.accent)),
            Span::styled("─".repeat(rest), Style::default().fg(palette.border)),
        ])),
        area,
    );
}

fn render_body(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let body = app.layout.body;
    let wall_clock = Utc::now();
    match (app.view, app.thread.as_ref()) {
        (View::Thread, Some(view)) => {
            let Some(thread) = app.forum.thread(&view.thread_id) else {
                return;
            };
            thread_render::render(
                frame,
                body,
                &ThreadRender {
                    forum: &app.forum,
                    thread,
                    view,
                    votes: &app.votes,
                    palette,
                    bookmarked: app.bookmarks.contains(&thread.id),
                    now: app.now,
                    wall_clock,
                },
            );
        }
        _ => home_render::render(
            frame,
            body,
            &HomeView {
                forum: &app.forum,
                home: &app.home,
                bookmarks: &app.bookmarks,
                palette,
                user: app.user.as_deref(),
                now: app.now,
                wall_clock,
                particles: &app.particles,
                elapsed: app.now.saturating_duration_since(app.started_at),
            },
        ),
    }
}

fn footer_hints(app: &AppState) -> &'static [(&'static str, &'static str)] {
    if app.overlays.active_modal().is_some() {
        return &[("Esc", "close"), ("Tab", "next field"), ("Enter", "submit")];
    }
    if app.overlays.is_open(OverlayId::NavDrawer).unwrap_or(false) {
        return &[("j/k", "move"), ("Enter", "go"), ("Esc", "close")];
    }
    match app.view {
        View::Thread if app.thread.as_ref().is_some_and(|v| v.reply_focused) => {
            &[("Enter", "post reply"), ("Esc", "cancel")]
        }
        View::Thread => &[
            ("j/k", "scroll"),
            ("Tab", "next post"),
            ("u/d", "vote"),
            ("c", "copy code"),
            ("r", "reply"),
            ("s", "save"),
            ("h", "back"),
        ],
        View::Home => &[
            ("j/k", "select"),
            ("Enter", "open"),
            ("←/→", "filter"),
            ("s", "save"),
            ("^K", "search"),
            ("^N", "new"),
            ("^B", "menu"),
            ("q", "quit"),
        ],
    }
}

fn render_footer(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let footer = app.layout.footer;
    if footer.height == 0 {
        return;
    }
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in footer_hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(palette.border)));
        }
        spans.push(Span::styled(*key, Style::default().fg(palette.accent)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(palette.muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), footer);

    if show_back_to_top(app.page_scroll()) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " ↑ t top ",
                Style::default()
                    .fg(palette.background)
                    .bg(palette.secondary),
            ))
            .alignment(Alignment::Right),
            footer,
        );
    }
}

fn render_overlays(app: &AppState, frame: &mut Frame, palette: &Palette) {
    if app.overlays.is_open(OverlayId::NavDrawer).unwrap_or(false) {
        app.panels.drawer.render(frame, app.layout.drawer, palette);
    }
    let Some(modal) = app.overlays.active_modal() else {
        return;
    };
    let popup = app.layout.surface(modal);
    if popup.width == 0 || popup.height == 0 {
        return;
    }
    let focused = app.overlays.focused().is_some();
    match modal {
        OverlayId::Search => app
            .panels
            .search
            .render(frame, popup, palette, &app.forum, focused),
        OverlayId::CreateThread => app.panels.create_thread.render(
            frame,
            popup,
            palette,
            &app.forum.categories,
            focused,
        ),
        LOGIN_DIALOG => app.panels.login.render(frame, popup, palette, focused),
        SIGNUP_DIALOG => app.panels.signup.render(frame, popup, palette, focused),
        OverlayId::NavDrawer | OverlayId::Dialog(_) => {}
    }
}

/// Hover text under the control the pointer is on.
fn render_tooltip(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let Some(control) = app.hover else {
        return;
    };
    let Some((_, rect)) = app.layout.controls.iter().find(|(c, _)| *c == control) else {
        return;
    };
    let area = frame.area();
    let text = format!(" {} ", control.tooltip());
    let width = (text.width() as u16).min(area.width);
    let y = app.layout.header.y + app.layout.header.height;
    if y >= area.height {
        return;
    }
    let x = rect
        .x
        .min(area.width.saturating_sub(width));
    let tip = Rect::new(x, y, width, 1);
    frame.render_widget(Clear, tip);
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default().fg(palette.background).bg(palette.text),
        )),
        tip,
    );
}

fn render_toast(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let Some(toast) = app.toasts.current() else {
        return;
    };
    let area = frame.area();
    let text = format!("{} {}", toast.kind.icon(), toast.message);
    let max_width = area.width.saturating_sub(4);
    if max_width < 6 || area.height < 4 {
        return;
    }
    let text = truncate_with_ellipsis(&text, usize::from(max_width - 4));
    let width = (text.width() as u16 + 4).min(max_width);
    let bottom = app.layout.footer.y.max(3);
    let popup = Rect::new(
        area.width.saturating_sub(width + 2),
        bottom.saturating_sub(3),
        width,
        3,
    );
    let color = palette.toast(toast.kind);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(palette.text)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(palette.surface)),
            ),
        popup,
    );
}

fn render_loading(app: &AppState, frame: &mut Frame, palette: &Palette) {
    let Some(screen) = app.loading.as_ref() else {
        return;
    };
    let phase = screen.phase(app.now);
    if phase == LoadingPhase::Hidden {
        return;
    }
    let area = frame.area();
    frame.render_widget(Clear, area);
    let mut style = Style::default().fg(palette.accent).bg(palette.background);
    if screen.opacity(app.now) < 0.5 {
        style = style.fg(palette.border);
    }
    frame.render_widget(Block::default().style(style), area);

    let middle = area.y + area.height / 2;
    let lines = [
        (LOGO, style.add_modifier(Modifier::BOLD)),
        ("", style),
        (screen.message(), style),
    ];
    for (i, (text, line_style)) in lines.into_iter().enumerate() {
        let y = middle.saturating_sub(1) + i as u16;
        if y >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(text, line_style)).alignment(Alignment::Center),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::events::UiEvent;
    use crate::state::test_app;
    use crate::update::update;

    fn screen_text(app: &mut AppState, width: u16, height: u16) -> String {
        update(app, UiEvent::Frame { width, height });
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_loading_screen_covers_page() {
        let (_dir, mut app) = test_app();
        let text = screen_text(&mut app, 100, 30);
        let message = app.loading.as_ref().unwrap().message();
        assert!(text.contains(message));
        assert!(!text.contains("Categories"));
    }

    #[test]
    fn test_home_renders_header_and_hints() {
        let (_dir, mut app) = test_app();
        app.loading = None;
        let text = screen_text(&mut app, 120, 40);
        assert!(text.contains("NEXUS"));
        assert!(text.contains("Search"));
        assert!(text.contains("quit"));
    }

    #[test]
    fn test_toast_is_drawn() {
        let (_dir, mut app) = test_app();
        app.loading = None;
        app.toasts
            .show_at("Saved", nexus_core::widgets::ToastKind::Success, app.now);
        let text = screen_text(&mut app, 120, 40);
        assert!(text.contains("Saved"));
    }

    #[test]
    fn test_open_search_panel_is_drawn() {
        let (_dir, mut app) = test_app();
        app.loading = None;
        app.overlays.open(OverlayId::Search).unwrap();
        let text = screen_text(&mut app, 120, 40);
        assert!(text.contains("Esc"));
        assert!(text.contains("close"));
    }
}
