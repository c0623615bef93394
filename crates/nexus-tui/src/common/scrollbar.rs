//! Scrollbar with a stable thumb size.
//!
//! ratatui's built-in scrollbar rounds the thumb start and end separately,
//! so the thumb length wobbles as the offset changes. This one fixes the
//! thumb length up front and positions it manually.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

#[derive(Debug, Clone)]
pub struct Scrollbar {
    total_lines: usize,
    viewport_height: usize,
    scroll_offset: usize,
    style: Style,
}

impl Scrollbar {
    pub fn new(total_lines: usize, viewport_height: usize, scroll_offset: usize) -> Self {
        Self {
            total_lines,
            viewport_height,
            scroll_offset,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn should_display(&self) -> bool {
        self.total_lines > self.viewport_height
    }

    /// Thumb start row and length for a track of `track_len` rows.
    fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
        if !self.should_display() || track_len == 0 || max_scroll == 0 {
            return None;
        }
        let viewport_len = self.viewport_height.min(track_len);

        // round(track * viewport / (total - 1 + viewport))
        let denom = self
            .total_lines
            .saturating_sub(1)
            .saturating_add(viewport_len);
        let thumb_len = if denom > 0 {
            let numerator = track_len as u64 * viewport_len as u64;
            let rounded = (numerator + (denom as u64 / 2)) / denom as u64;
            (rounded as usize).clamp(1, track_len)
        } else {
            track_len
        };

        let available = track_len.saturating_sub(thumb_len);
        let offset = self.scroll_offset.min(max_scroll);
        let start = ((offset as u64 * available as u64) / max_scroll as u64) as usize;
        Some((start, thumb_len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((thumb_start, thumb_len)) = self.thumb(area.height as usize) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let symbol = if idx >= thumb_start && idx < thumb_start + thumb_len {
                THUMB_SYMBOL
            } else {
                TRACK_SYMBOL
            };
            buf.set_string(x, y, symbol, self.style);
        }
    }
}
