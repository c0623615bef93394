use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nexus_core::forum::Category;
use nexus_core::widgets::{ThreadForm, ToastKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, InputLine, PanelConfig, render_input_line, render_panel};
use super::{OverlayAction, OverlayUpdate};
use crate::common::{Palette, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateThreadField {
    #[default]
    Title,
    Category,
    Body,
    Tags,
}

impl CreateThreadField {
    const ORDER: [CreateThreadField; 4] = [
        CreateThreadField::Title,
        CreateThreadField::Category,
        CreateThreadField::Body,
        CreateThreadField::Tags,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateThreadPanel {
    pub title: TextField,
    /// Index into the forum's category list.
    pub category: usize,
    pub body: TextField,
    pub tags: TextField,
    pub field: CreateThreadField,
}

impl CreateThreadPanel {
    pub fn new() -> Self {
        Self {
            title: TextField::with_max_len(120),
            body: TextField::with_max_len(4000),
            tags: TextField::with_max_len(120),
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn active_text(&mut self) -> Option<&mut TextField> {
        match self.field {
            CreateThreadField::Title => Some(&mut self.title),
            CreateThreadField::Body => Some(&mut self.body),
            CreateThreadField::Tags => Some(&mut self.tags),
            CreateThreadField::Category => None,
        }
    }

    fn form(&self, categories: &[Category]) -> ThreadForm {
        ThreadForm {
            title: self.title.value().to_string(),
            category: categories
                .get(self.category)
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            body: self.body.value().to_string(),
            tags: self.tags.value().to_string(),
        }
    }

    fn submit(&mut self, categories: &[Category]) -> OverlayUpdate {
        let form = self.form(categories);
        match form.submit() {
            Ok(message) => {
                self.reset();
                OverlayUpdate::close()
                    .with_action(OverlayAction::CreateThread(form))
                    .with_toast(message, ToastKind::Success)
            }
            Err(err) => {
                self.field = CreateThreadField::Title;
                OverlayUpdate::stay().with_toast(err.to_string(), ToastKind::Warning)
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, categories: &[Category]) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(categories),
            KeyCode::Enter if self.field == CreateThreadField::Tags => self.submit(categories),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.field = self.field.next();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.field.previous();
                OverlayUpdate::stay()
            }
            KeyCode::Left if self.field == CreateThreadField::Category => {
                if !categories.is_empty() {
                    self.category = (self.category + categories.len() - 1) % categories.len();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Right | KeyCode::Char(' ') if self.field == CreateThreadField::Category => {
                if !categories.is_empty() {
                    self.category = (self.category + 1) % categories.len();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                if let Some(field) = self.active_text() {
                    field.backspace();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char('w') if ctrl => {
                if let Some(field) = self.active_text() {
                    field.delete_word();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.active_text() {
                    field.push(c);
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.active_text() {
            field.paste(text);
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        popup: Rect,
        palette: &Palette,
        categories: &[Category],
        focused: bool,
    ) {
        let hints = [
            InputHint::new("Tab", "next field"),
            InputHint::new("←→", "category"),
            InputHint::new("Ctrl+S", "post"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_panel(
            frame,
            popup,
            palette,
            &PanelConfig {
                title: "Create new thread",
                border_color: palette.secondary,
                hints: &hints,
            },
        );
        let body = layout.body;
        let row = |offset: u16| {
            Rect::new(
                body.x + 1,
                body.y + offset,
                body.width.saturating_sub(2),
                1,
            )
        };
        if body.height < 8 {
            return;
        }

        let fields = [
            (CreateThreadField::Title, "Title", &self.title, "What's on your mind?"),
            (CreateThreadField::Body, "Body ", &self.body, "Share the details..."),
            (CreateThreadField::Tags, "Tags ", &self.tags, "comma, separated, tags"),
        ];
        let offsets = [1, 5, 7];
        for ((field, label, value, placeholder), offset) in fields.into_iter().zip(offsets) {
            render_input_line(
                frame,
                row(offset),
                &InputLine {
                    label,
                    value: value.value(),
                    placeholder,
                    focused: focused && self.field == field,
                    palette,
                },
            );
        }

        let active = self.field == CreateThreadField::Category;
        let label_style = if active && focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        let mut spans = vec![Span::styled("Category ", label_style)];
        for (idx, category) in categories.iter().enumerate() {
            let style = if idx == self.category {
                Style::default()
                    .fg(palette.background)
                    .bg(palette.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            spans.push(Span::styled(format!(" {} ", category.name), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), row(3));
    }
}
