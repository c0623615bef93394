use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::common::{Palette, truncate_start_with_ellipsis};

/// Centers a `width` x `height` popup inside `area`, shrinking it to leave
/// a margin when the terminal is small.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

pub struct PanelConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub hints: &'a [InputHint<'a>],
}

pub struct PanelLayout {
    pub inner: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Clears `popup`, draws the rounded frame and hint footer, and returns the
/// regions inside it.
pub fn render_panel(
    frame: &mut Frame,
    popup: Rect,
    palette: &Palette,
    config: &PanelConfig<'_>,
) -> PanelLayout {
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(config.border_color))
        .style(Style::default().bg(palette.surface).fg(palette.text))
        .title(format!(" {} ", config.title))
        .title_style(
            Style::default()
                .fg(config.border_color)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let footer_height = u16::from(!config.hints.is_empty());
    let body_height = inner.height.saturating_sub(footer_height);
    let body = Rect::new(inner.x, inner.y, inner.width, body_height);
    let footer = Rect::new(inner.x, inner.y + body_height, inner.width, footer_height);

    if !config.hints.is_empty() {
        render_hints(frame, footer, config.hints, config.border_color, palette.muted);
    }

    PanelLayout {
        inner,
        body,
        footer,
    }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// A labelled single-line input: "<label> <text>█".
pub struct InputLine<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    /// Cursor is drawn only while the field holds keyboard focus.
    pub focused: bool,
    pub palette: &'a Palette,
}

pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let palette = input.palette;
    let label_width = unicode_width::UnicodeWidthStr::width(input.label) as u16;
    let max_text = area.width.saturating_sub(label_width + 2) as usize;

    let label_style = if input.focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };

    let mut spans = vec![Span::styled(format!("{} ", input.label), label_style)];
    if input.value.is_empty() {
        if input.focused {
            spans.push(Span::styled("█", Style::default().fg(palette.accent)));
        }
        spans.push(Span::styled(
            truncate_start_with_ellipsis(input.placeholder, max_text),
            Style::default().fg(palette.muted),
        ));
    } else {
        spans.push(Span::styled(
            truncate_start_with_ellipsis(input.value, max_text),
            Style::default().fg(palette.text),
        ));
        if input.focused {
            spans.push(Span::styled("█", Style::default().fg(palette.accent)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    hints: &[InputHint],
    key_color: Color,
    text_color: Color,
) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(text_color)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(key_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(text_color),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16, color: Color) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(separator, Style::default().fg(color))),
        Rect::new(area.x, area.y + y_offset, area.width, 1),
    );
}
