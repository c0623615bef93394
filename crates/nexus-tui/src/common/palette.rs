//! Colors per theme.

use nexus_core::widgets::{Theme, ToastKind};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub secondary: Color,
    pub border: Color,
    pub surface: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(15, 15, 26),
    text: Color::Rgb(228, 228, 240),
    muted: Color::Rgb(130, 130, 160),
    accent: Color::Rgb(0, 212, 255),
    secondary: Color::Rgb(123, 97, 255),
    border: Color::Rgb(60, 60, 90),
    surface: Color::Rgb(26, 26, 46),
    success: Color::Rgb(0, 255, 136),
    warning: Color::Rgb(255, 184, 0),
    error: Color::Rgb(255, 71, 87),
    info: Color::Rgb(0, 212, 255),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(245, 246, 250),
    text: Color::Rgb(26, 26, 46),
    muted: Color::Rgb(100, 100, 120),
    accent: Color::Rgb(0, 120, 200),
    secondary: Color::Rgb(100, 70, 220),
    border: Color::Rgb(200, 200, 215),
    surface: Color::Rgb(255, 255, 255),
    success: Color::Rgb(0, 150, 80),
    warning: Color::Rgb(200, 130, 0),
    error: Color::Rgb(210, 40, 60),
    info: Color::Rgb(0, 120, 200),
};

/// Matrix mode: every foreground goes green on black.
const MATRIX: Palette = Palette {
    background: Color::Black,
    text: Color::Rgb(0, 255, 65),
    muted: Color::Rgb(0, 160, 40),
    accent: Color::Rgb(0, 255, 65),
    secondary: Color::Rgb(0, 200, 50),
    border: Color::Rgb(0, 120, 30),
    surface: Color::Black,
    success: Color::Rgb(0, 255, 65),
    warning: Color::Rgb(0, 255, 65),
    error: Color::Rgb(0, 255, 65),
    info: Color::Rgb(0, 255, 65),
};

impl Palette {
    pub fn for_theme(theme: Theme, matrix: bool) -> Self {
        if matrix {
            return MATRIX;
        }
        match theme {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub fn toast(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.error,
            ToastKind::Warning => self.warning,
            ToastKind::Info => self.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_overrides_theme() {
        assert_eq!(Palette::for_theme(Theme::Light, true), MATRIX);
        assert_eq!(Palette::for_theme(Theme::Light, false), LIGHT);
        assert_ne!(
            Palette::for_theme(Theme::Dark, false).background,
            Palette::for_theme(Theme::Light, false).background
        );
    }
}
