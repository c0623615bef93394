//! Per-frame screen geometry.
//!
//! Computed once per `Frame` event by the reducer and read by both the
//! renderer and mouse handling, so hit testing always matches what is on
//! screen.

use nexus_core::overlay::{Bounds, BoundsMap, Element, OverlayId};
use nexus_core::widgets::Theme;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::overlays::render_utils::popup_area;
use crate::overlays::{LOGIN_DIALOG, SIGNUP_DIALOG};

pub const HEADER_HEIGHT: u16 = 3;
/// Widths above this are "desktop": the nav drawer closes on resize.
pub const DESKTOP_BREAKPOINT: u16 = 100;
pub const DRAWER_WIDTH: u16 = 26;

/// Clickable controls in the header bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderControl {
    Menu,
    Search,
    NewThread,
    Theme,
    Login,
    Signup,
}

impl HeaderControl {
    pub fn label(self, theme: Theme) -> &'static str {
        match self {
            HeaderControl::Menu => "☰",
            HeaderControl::Search => "⌕ Search",
            HeaderControl::NewThread => "+ New Thread",
            HeaderControl::Theme => theme.toggle_icon(),
            HeaderControl::Login => "Log in",
            HeaderControl::Signup => "Sign up",
        }
    }

    /// Hover text.
    pub fn tooltip(self) -> &'static str {
        match self {
            HeaderControl::Menu => "Toggle menu (Ctrl+B)",
            HeaderControl::Search => "Search threads (Ctrl+K)",
            HeaderControl::NewThread => "Start a new thread (Ctrl+N)",
            HeaderControl::Theme => "Toggle theme (Ctrl+/)",
            HeaderControl::Login => "Log in to your account",
            HeaderControl::Signup => "Create an account",
        }
    }

    /// Overlay this control triggers, if any.
    pub fn overlay(self) -> Option<OverlayId> {
        match self {
            HeaderControl::Menu => Some(OverlayId::NavDrawer),
            HeaderControl::Search => Some(OverlayId::Search),
            HeaderControl::NewThread => Some(OverlayId::CreateThread),
            HeaderControl::Login => Some(LOGIN_DIALOG),
            HeaderControl::Signup => Some(SIGNUP_DIALOG),
            HeaderControl::Theme => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreenLayout {
    pub area: Rect,
    pub header: Rect,
    /// Thin bar under the header: reading progress in thread view.
    pub progress: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub controls: Vec<(HeaderControl, Rect)>,
    pub search: Rect,
    pub create_thread: Rect,
    pub dialog: Rect,
    pub drawer: Rect,
    /// Surfaces and triggers for outside-click dismissal.
    pub hits: BoundsMap,
}

impl ScreenLayout {
    pub fn compute(width: u16, height: u16, theme: Theme, signed_in: bool) -> Self {
        let area = Rect::new(0, 0, width, height);
        let header_height = HEADER_HEIGHT.min(height);
        let header = Rect::new(0, 0, width, header_height);
        let footer_height = u16::from(height > header_height + 1);
        let progress_height = u16::from(height > header_height + footer_height + 1);
        let progress = Rect::new(0, header_height, width, progress_height);
        let body_y = header_height + progress_height;
        let body_height = height.saturating_sub(body_y + footer_height);
        let body = Rect::new(0, body_y, width, body_height);
        let footer = Rect::new(0, body_y + body_height, width, footer_height);

        let controls = header_controls(header, theme, signed_in);

        let below_header = Rect::new(0, header_height, width, height.saturating_sub(header_height));
        let search = popup_area(below_header, 72, 18);
        let create_thread = popup_area(below_header, 72, 14);
        let dialog = popup_area(below_header, 52, 13);
        let drawer = Rect::new(
            0,
            header_height,
            DRAWER_WIDTH.min(width),
            height.saturating_sub(header_height),
        );

        let mut hits = BoundsMap::new();
        hits.insert(Element::Surface(OverlayId::Search), bounds(search));
        hits.insert(Element::Surface(OverlayId::CreateThread), bounds(create_thread));
        hits.insert(Element::Surface(LOGIN_DIALOG), bounds(dialog));
        hits.insert(Element::Surface(SIGNUP_DIALOG), bounds(dialog));
        hits.insert(Element::Surface(OverlayId::NavDrawer), bounds(drawer));
        for (control, rect) in &controls {
            if let Some(id) = control.overlay() {
                hits.insert(Element::Trigger(id), bounds(*rect));
            }
        }

        Self {
            area,
            header,
            progress,
            body,
            footer,
            controls,
            search,
            create_thread,
            dialog,
            drawer,
            hits,
        }
    }

    pub fn control_at(&self, x: u16, y: u16) -> Option<HeaderControl> {
        self.controls
            .iter()
            .find(|(_, rect)| contains(*rect, x, y))
            .map(|(control, _)| *control)
    }

    pub fn surface(&self, id: OverlayId) -> Rect {
        match id {
            OverlayId::Search => self.search,
            OverlayId::CreateThread => self.create_thread,
            OverlayId::NavDrawer => self.drawer,
            OverlayId::Dialog(_) => self.dialog,
        }
    }
}

pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn bounds(rect: Rect) -> Bounds {
    Bounds::new(rect.x, rect.y, rect.width, rect.height)
}

/// Menu button on the left; the rest right-aligned on the middle row.
fn header_controls(header: Rect, theme: Theme, signed_in: bool) -> Vec<(HeaderControl, Rect)> {
    if header.height == 0 {
        return Vec::new();
    }
    let row = header.y + header.height / 2;
    let mut controls = vec![(
        HeaderControl::Menu,
        Rect::new(header.x + 1, row, control_width(HeaderControl::Menu, theme), 1),
    )];

    let mut right: Vec<HeaderControl> = vec![
        HeaderControl::Search,
        HeaderControl::NewThread,
        HeaderControl::Theme,
    ];
    if !signed_in {
        right.extend([HeaderControl::Login, HeaderControl::Signup]);
    }

    let mut x = header.x + header.width.saturating_sub(1);
    let mut placed = Vec::new();
    for control in right.into_iter().rev() {
        let width = control_width(control, theme);
        // leave the logo area free on narrow terminals
        if x < width + 16 {
            break;
        }
        x -= width;
        placed.push((control, Rect::new(x, row, width, 1)));
        x = x.saturating_sub(1);
    }
    placed.reverse();
    controls.extend(placed);
    controls
}

/// Label plus one column of padding each side.
fn control_width(control: HeaderControl, theme: Theme) -> u16 {
    control.label(theme).width() as u16 + 2
}

#[cfg(test)]
mod tests {
    use nexus_core::overlay::{HitTest, Point};

    use super::*;

    #[test]
    fn test_regions_tile_the_screen() {
        let layout = ScreenLayout::compute(120, 40, Theme::Dark, false);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.progress.y, HEADER_HEIGHT);
        assert_eq!(layout.body.y, HEADER_HEIGHT + 1);
        assert_eq!(layout.footer.y, 39);
        assert_eq!(
            layout.header.height + layout.progress.height + layout.body.height + 1,
            40
        );
    }

    #[test]
    fn test_controls_hide_auth_when_signed_in() {
        let anon = ScreenLayout::compute(120, 40, Theme::Dark, false);
        let user = ScreenLayout::compute(120, 40, Theme::Dark, true);
        assert!(anon.controls.iter().any(|(c, _)| *c == HeaderControl::Login));
        assert!(!user.controls.iter().any(|(c, _)| *c == HeaderControl::Login));
        assert!(user.controls.iter().any(|(c, _)| *c == HeaderControl::Theme));
    }

    #[test]
    fn test_control_at_finds_menu() {
        let layout = ScreenLayout::compute(120, 40, Theme::Dark, false);
        let (_, menu) = layout.controls[0];
        assert_eq!(
            layout.control_at(menu.x, menu.y),
            Some(HeaderControl::Menu)
        );
        assert_eq!(layout.control_at(60, 20), None);
    }

    #[test]
    fn test_hits_cover_surfaces_and_triggers() {
        let layout = ScreenLayout::compute(120, 40, Theme::Dark, false);
        let center = Point::new(
            layout.search.x + layout.search.width / 2,
            layout.search.y + layout.search.height / 2,
        );
        assert!(layout.hits.contains_point(Element::Surface(OverlayId::Search), center));
        let (_, menu) = layout.controls[0];
        assert!(layout.hits.contains_point(
            Element::Trigger(OverlayId::NavDrawer),
            Point::new(menu.x, menu.y)
        ));
        assert!(!layout.hits.contains_point(
            Element::Surface(OverlayId::NavDrawer),
            Point::new(119, 39)
        ));
    }
}
