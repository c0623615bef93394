use crossterm::event::{KeyCode, KeyEvent};
use nexus_core::overlay::OverlayId;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{LOGIN_DIALOG, OverlayAction, OverlayUpdate, SIGNUP_DIALOG};
use crate::common::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Search,
    NewThread,
    Login,
    Signup,
    Theme,
    Quit,
}

impl NavItem {
    pub const ALL: [NavItem; 7] = [
        NavItem::Home,
        NavItem::Search,
        NavItem::NewThread,
        NavItem::Login,
        NavItem::Signup,
        NavItem::Theme,
        NavItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavItem::Home => "⌂  Home",
            NavItem::Search => "⌕  Search",
            NavItem::NewThread => "+  New thread",
            NavItem::Login => "→  Log in",
            NavItem::Signup => "★  Sign up",
            NavItem::Theme => "◐  Toggle theme",
            NavItem::Quit => "×  Quit",
        }
    }

    /// Activating a link always closes the drawer.
    fn activate(self) -> OverlayUpdate {
        match self {
            NavItem::Home => OverlayUpdate::close().with_action(OverlayAction::GoHome),
            NavItem::Search => OverlayUpdate::open(OverlayId::Search),
            NavItem::NewThread => OverlayUpdate::open(OverlayId::CreateThread),
            NavItem::Login => OverlayUpdate::open(LOGIN_DIALOG),
            NavItem::Signup => OverlayUpdate::open(SIGNUP_DIALOG),
            NavItem::Theme => OverlayUpdate::close().with_action(OverlayAction::ToggleTheme),
            NavItem::Quit => OverlayUpdate::close().with_action(OverlayAction::Quit),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavDrawer {
    pub selected: usize,
}

impl NavDrawer {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1) % NavItem::ALL.len();
                OverlayUpdate::stay()
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.selected = (self.selected + NavItem::ALL.len() - 1) % NavItem::ALL.len();
                OverlayUpdate::stay()
            }
            KeyCode::Enter => NavItem::ALL[self.selected].activate(),
            KeyCode::Char('q') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    /// Item under row `row` of the drawer surface, if any.
    pub fn item_at(area: Rect, row: u16) -> Option<NavItem> {
        let first = area.y + 1;
        if row < first {
            return None;
        }
        NavItem::ALL.get(usize::from(row - first) / 2).copied()
    }

    pub fn click(&mut self, area: Rect, row: u16) -> OverlayUpdate {
        match Self::item_at(area, row) {
            Some(item) => {
                self.selected = NavItem::ALL.iter().position(|i| *i == item).unwrap_or(0);
                item.activate()
            }
            None => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::default()];
        for (idx, item) in NavItem::ALL.iter().enumerate() {
            let style = if idx == self.selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            let marker = if idx == self.selected { "▌" } else { " " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::styled(format!(" {}", item.label()), style),
            ]));
            lines.push(Line::default());
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
