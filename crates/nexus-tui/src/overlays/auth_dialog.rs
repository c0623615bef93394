//! Login and signup dialogs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nexus_core::overlay::{FocusTarget, OverlayId};
use nexus_core::widgets::{LoginForm, SignupForm, Strength, ToastKind, Visibility};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, InputLine, PanelConfig, render_input_line, render_panel};
use super::{LOGIN_DIALOG, OverlayAction, OverlayUpdate, SIGNUP_DIALOG};
use crate::common::{Palette, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Signup,
}

impl AuthKind {
    pub fn overlay(self) -> OverlayId {
        match self {
            AuthKind::Login => LOGIN_DIALOG,
            AuthKind::Signup => SIGNUP_DIALOG,
        }
    }

    pub fn focus_target(self) -> FocusTarget {
        match self {
            AuthKind::Login => FocusTarget::LoginUsername,
            AuthKind::Signup => FocusTarget::SignupUsername,
        }
    }

    fn other(self) -> Self {
        match self {
            AuthKind::Login => AuthKind::Signup,
            AuthKind::Signup => AuthKind::Login,
        }
    }

    fn field_count(self) -> usize {
        match self {
            AuthKind::Login => 2,
            AuthKind::Signup => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct AuthDialog {
    pub kind: AuthKind,
    pub username: TextField,
    pub email: TextField,
    pub password: TextField,
    /// Index of the field receiving input.
    pub field: usize,
    pub visibility: Visibility,
}

impl AuthDialog {
    pub fn new(kind: AuthKind) -> Self {
        Self {
            kind,
            username: TextField::with_max_len(40),
            email: TextField::with_max_len(120),
            password: TextField::with_max_len(128),
            field: 0,
            visibility: Visibility::default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    fn fields(&self) -> &'static [Field] {
        match self.kind {
            AuthKind::Login => &[Field::Username, Field::Password],
            AuthKind::Signup => &[Field::Username, Field::Email, Field::Password],
        }
    }

    fn active_field(&self) -> Field {
        self.fields()
            .get(self.field)
            .copied()
            .unwrap_or(Field::Username)
    }

    fn active_text(&mut self) -> &mut TextField {
        match self.active_field() {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    pub fn strength(&self) -> Option<Strength> {
        self.signup_form().strength()
    }

    fn signup_form(&self) -> SignupForm {
        SignupForm {
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    fn submit(&mut self) -> OverlayUpdate {
        let username = self.username.value().trim().to_string();
        let result = match self.kind {
            AuthKind::Login => LoginForm {
                username: username.clone(),
                password: self.password.value().to_string(),
            }
            .submit(),
            AuthKind::Signup => self.signup_form().submit(),
        };
        match result {
            Ok(message) => {
                tracing::info!(kind = ?self.kind, "signed in");
                self.reset();
                OverlayUpdate::close()
                    .with_action(OverlayAction::SignedIn(username))
                    .with_toast(message, ToastKind::Success)
            }
            Err(err) => OverlayUpdate::stay().with_toast(err.to_string(), ToastKind::Warning),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let count = self.kind.field_count();
        match key.code {
            KeyCode::Enter if self.field + 1 < count => {
                self.field += 1;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.field = (self.field + 1) % count;
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = (self.field + count - 1) % count;
                OverlayUpdate::stay()
            }
            KeyCode::Char('r') if ctrl => {
                self.visibility.toggle();
                OverlayUpdate::stay()
            }
            KeyCode::Char('o') if ctrl => OverlayUpdate::open(self.kind.other().overlay()),
            KeyCode::Char('w') if ctrl => {
                self.active_text().delete_word();
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.active_text().backspace();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.active_text().push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.active_text().paste(text);
    }

    pub fn render(&self, frame: &mut Frame, popup: Rect, palette: &Palette, focused: bool) {
        let (title, switch) = match self.kind {
            AuthKind::Login => ("Welcome back", "sign up instead"),
            AuthKind::Signup => ("Join the community", "log in instead"),
        };
        let hints = [
            InputHint::new("Tab", "next"),
            InputHint::new("Ctrl+R", "show password"),
            InputHint::new("Ctrl+O", switch),
        ];
        let layout = render_panel(
            frame,
            popup,
            palette,
            &PanelConfig {
                title,
                border_color: palette.accent,
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

        let masked = self.visibility.display(self.password.value());
        let eye = if self.visibility.is_revealed() { "◉" } else { "◎" };
        let mut offset = 1;
        for (idx, field) in self.fields().iter().enumerate() {
            if offset >= body.height {
                return;
            }
            let (label, value, placeholder) = match field {
                Field::Username => ("Username", self.username.value(), "your handle"),
                Field::Email => ("Email   ", self.email.value(), "you@example.com"),
                Field::Password => ("Password", masked.as_str(), eye),
            };
            render_input_line(
                frame,
                row(offset),
                &InputLine {
                    label,
                    value,
                    placeholder,
                    focused: focused && idx == self.field,
                    palette,
                },
            );
            offset += 2;
        }

        if self.kind == AuthKind::Signup
            && let Some(strength) = self.strength()
            && offset < body.height
        {
            frame.render_widget(
                Paragraph::new(strength_meter(strength, body.width.saturating_sub(2), palette)),
                row(offset),
            );
        }
    }
}

fn strength_color(strength: Strength, palette: &Palette) -> Color {
    match strength {
        Strength::Weak => palette.error,
        Strength::Medium => palette.warning,
        Strength::Strong => palette.success,
    }
}

/// `████████░░░░ Medium` scaled to `width` columns.
fn strength_meter(strength: Strength, width: u16, palette: &Palette) -> Line<'static> {
    let label = strength.label();
    let bar_width = usize::from(width).saturating_sub(label.len() + 1);
    let filled = bar_width * usize::from(strength.percentage()) / 100;
    let color = strength_color(strength, palette);
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(palette.border),
        ),
        Span::raw(" "),
        Span::styled(
            label.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(dialog: &mut AuthDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_login_requires_username() {
        let mut dialog = AuthDialog::new(AuthKind::Login);
        dialog.field = 1;
        let update = dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(update.transition, OverlayTransition::Stay);
        assert_eq!(
            update.toast,
            Some((
                "Please enter your username! ⚠️".to_string(),
                ToastKind::Warning
            ))
        );
    }

    #[test]
    fn test_login_success_signs_in() {
        let mut dialog = AuthDialog::new(AuthKind::Login);
        type_str(&mut dialog, "ada");
        dialog.handle_key(key(KeyCode::Enter));
        type_str(&mut dialog, "hunter2");
        let update = dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(update.transition, OverlayTransition::Close);
        assert_eq!(update.action, Some(OverlayAction::SignedIn("ada".to_string())));
        assert_eq!(
            update.toast.map(|(m, _)| m),
            Some("Welcome back, ada! 🎉".to_string())
        );
        assert!(dialog.username.is_empty());
    }

    #[test]
    fn test_signup_checks_password_before_email() {
        let mut dialog = AuthDialog::new(AuthKind::Signup);
        type_str(&mut dialog, "ada");
        dialog.field = 2;
        type_str(&mut dialog, "short");
        let update = dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(
            update.toast.map(|(m, _)| m),
            Some("Password must be at least 8 characters! ⚠️".to_string())
        );
    }

    #[test]
    fn test_signup_strength_tracks_password() {
        let mut dialog = AuthDialog::new(AuthKind::Signup);
        assert_eq!(dialog.strength(), None);
        dialog.field = 2;
        type_str(&mut dialog, "Abcdefgh12!x");
        assert_eq!(dialog.strength(), Some(Strength::Strong));
    }

    #[test]
    fn test_visibility_toggle_and_switch() {
        let mut dialog = AuthDialog::new(AuthKind::Login);
        dialog.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(dialog.visibility.is_revealed());

        let update = dialog.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL));
        assert_eq!(update.transition, OverlayTransition::Open(SIGNUP_DIALOG));
    }

    #[test]
    fn test_strength_meter_fills_by_percentage() {
        let palette = Palette::for_theme(nexus_core::widgets::Theme::Dark, false);
        let line = strength_meter(Strength::Strong, 20, &palette);
        let filled = line.spans[0].content.chars().count();
        let empty = line.spans[1].content.chars().count();
        assert_eq!(empty, 0);
        assert_eq!(filled, 20 - "Strong".len() - 1);
    }
}
