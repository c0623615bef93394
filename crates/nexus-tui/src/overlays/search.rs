use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nexus_core::forum::{Forum, MIN_SEARCH_LEN};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{
    InputHint, InputLine, PanelConfig, render_input_line, render_panel, render_separator,
};
use super::{OverlayAction, OverlayUpdate};
use crate::common::{Palette, TextField, truncate_with_ellipsis};

#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    pub query: TextField,
    pub selected: usize,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self {
            query: TextField::with_max_len(120),
            selected: 0,
        }
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.selected = 0;
    }

    /// Ids of the threads matching the current query, best first.
    pub fn results(&self, forum: &Forum) -> Vec<String> {
        forum
            .search(self.query.value())
            .into_iter()
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn select_next(&mut self, forum: &Forum) {
        let count = self.results(forum).len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent, forum: &Forum) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                let results = self.results(forum);
                if let Some(id) = results.get(self.selected) {
                    tracing::debug!(thread = %id, query = self.query.value(), "search result opened");
                    return OverlayUpdate::close()
                        .with_action(OverlayAction::OpenThread(id.clone()));
                }
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                self.select_next(forum);
                OverlayUpdate::stay()
            }
            KeyCode::Up => {
                self.select_previous();
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.query.backspace();
                self.selected = 0;
                OverlayUpdate::stay()
            }
            KeyCode::Char('w') if ctrl => {
                self.query.delete_word();
                self.selected = 0;
                OverlayUpdate::stay()
            }
            KeyCode::Char('u') if ctrl => {
                self.reset();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.selected = 0;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.query.paste(text);
        self.selected = 0;
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        popup: Rect,
        palette: &Palette,
        forum: &Forum,
        focused: bool,
    ) {
        let hints = [
            InputHint::new("↑↓", "select"),
            InputHint::new("Enter", "open"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_panel(
            frame,
            popup,
            palette,
            &PanelConfig {
                title: "Search threads",
                border_color: palette.accent,
                hints: &hints,
            },
        );
        let body = layout.body;
        if body.height < 3 {
            return;
        }

        render_input_line(
            frame,
            Rect::new(body.x + 1, body.y, body.width.saturating_sub(2), 1),
            &InputLine {
                label: "⌕",
                value: self.query.value(),
                placeholder: "Search threads, tags...",
                focused,
                palette,
            },
        );
        render_separator(frame, body, 1, palette.border);

        let list = Rect::new(
            body.x + 1,
            body.y + 2,
            body.width.saturating_sub(2),
            body.height - 2,
        );
        if self.query.value().chars().count() <= MIN_SEARCH_LEN {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Type at least 3 characters to search",
                    Style::default().fg(palette.muted),
                )),
                list,
            );
            return;
        }

        let results = forum.search(self.query.value());
        if results.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No threads found",
                    Style::default().fg(palette.muted),
                )),
                list,
            );
            return;
        }

        // keep the selection in view
        let visible = list.height as usize;
        let start = self.selected.saturating_sub(visible.saturating_sub(1));
        let width = list.width as usize;
        let lines: Vec<Line> = results
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(idx, thread)| {
                let selected = idx == self.selected;
                let marker = if selected { "▸ " } else { "  " };
                let tags = thread
                    .tags
                    .iter()
                    .map(|t| format!("#{t}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let title_style = if selected {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.text)
                };
                let title = truncate_with_ellipsis(&thread.title, width.saturating_sub(2));
                let title_width = unicode_width::UnicodeWidthStr::width(title.as_str());
                let tag_room = width.saturating_sub(title_width + 4);
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(title, title_style),
                    Span::raw("  "),
                    Span::styled(
                        truncate_with_ellipsis(&tags, tag_room),
                        Style::default().fg(palette.muted),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(panel: &mut SearchPanel, text: &str, forum: &Forum) {
        for c in text.chars() {
            panel.handle_key(key(KeyCode::Char(c)), forum);
        }
    }

    #[test]
    fn test_enter_opens_selected_result() {
        let forum = Forum::builtin().unwrap();
        let mut panel = SearchPanel::new();
        type_str(&mut panel, "rust", &forum);
        let expected = panel.results(&forum)[0].clone();
        let update = panel.handle_key(key(KeyCode::Enter), &forum);
        assert_eq!(update.transition, OverlayTransition::Close);
        assert_eq!(update.action, Some(OverlayAction::OpenThread(expected)));
    }

    #[test]
    fn test_short_query_has_no_results() {
        let forum = Forum::builtin().unwrap();
        let mut panel = SearchPanel::new();
        type_str(&mut panel, "ru", &forum);
        assert!(panel.results(&forum).is_empty());
        let update = panel.handle_key(key(KeyCode::Enter), &forum);
        assert_eq!(update, OverlayUpdate::stay());
    }

    #[test]
    fn test_typing_resets_selection() {
        let forum = Forum::builtin().unwrap();
        let mut panel = SearchPanel::new();
        panel.selected = 3;
        let mut event = key(KeyCode::Char('a'));
        event.kind = KeyEventKind::Press;
        panel.handle_key(event, &forum);
        assert_eq!(panel.selected, 0);
        assert_eq!(panel.query.value(), "a");
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let forum = Forum::builtin().unwrap();
        let mut panel = SearchPanel::new();
        type_str(&mut panel, "zzzz", &forum);
        panel.handle_key(key(KeyCode::Down), &forum);
        assert_eq!(panel.selected, 0);
        panel.handle_key(key(KeyCode::Up), &forum);
        assert_eq!(panel.selected, 0);
    }
}
