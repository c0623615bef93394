use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use nexus_core::forum::{Category, Forum, Thread};
use nexus_core::particles::ParticleField;
use nexus_core::widgets::{Bookmarks, format_relative};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::state::{
    CATEGORY_HEIGHT, HomeSection, HomeState, THREAD_ROW_HEIGHT, filter_tab_spans,
};
use crate::common::{Palette, Scrollbar, truncate_with_ellipsis};

pub struct HomeView<'a> {
    pub forum: &'a Forum,
    pub home: &'a HomeState,
    pub bookmarks: &'a Bookmarks,
    pub palette: &'a Palette,
    pub user: Option<&'a str>,
    pub now: Instant,
    pub wall_clock: DateTime<Utc>,
    pub particles: &'a ParticleField,
    pub elapsed: Duration,
}

pub fn render(frame: &mut Frame, area: Rect, view: &HomeView<'_>) {
    if area.width < 4 || area.height == 0 {
        return;
    }
    // leave the last column to the scrollbar
    let content = Rect::new(area.x, area.y, area.width - 1, area.height);
    let lines = page_lines(view, content.width);
    let total = lines.len();

    frame.render_widget(
        Paragraph::new(lines).scroll((view.home.scroll.min(u32::from(u16::MAX)) as u16, 0)),
        content,
    );
    render_particles(frame, content, view);
    frame.render_widget(
        Scrollbar::new(total, area.height as usize, view.home.scroll as usize)
            .style(Style::default().fg(view.palette.border)),
        area,
    );
}

/// Particles only fill cells the page left blank.
fn render_particles(frame: &mut Frame, area: Rect, view: &HomeView<'_>) {
    let buf = frame.buffer_mut();
    for (col, row, particle) in view.particles.positions(area.width, area.height, view.elapsed) {
        let x = area.x + col;
        let y = area.y + row;
        let Some(cell) = buf.cell_mut((x, y)) else {
            continue;
        };
        if cell.symbol() != " " {
            continue;
        }
        let color = if particle.opacity >= 0.5 {
            view.palette.accent
        } else {
            view.palette.border
        };
        cell.set_char(particle.glyph()).set_fg(color);
    }
}

fn page_lines(view: &HomeView<'_>, width: u16) -> Vec<Line<'static>> {
    let geometry = &view.home.geometry;
    let mut lines = Vec::with_capacity(geometry.content_height as usize);
    for span in &geometry.spans {
        let mut section = match span.section {
            HomeSection::Hero => hero_lines(view, width),
            HomeSection::Stats => stats_lines(view, width),
            HomeSection::Categories => category_lines(view, width),
            HomeSection::Threads => thread_lines(view, width),
        };
        section.resize(span.height as usize, Line::default());
        if !view.home.is_revealed(span.section) {
            section = section
                .into_iter()
                .map(|line| dim(line, view.palette))
                .collect();
        }
        lines.extend(section);
        lines.push(Line::default());
    }
    lines
}

/// Unrevealed sections render faded.
fn dim(line: Line<'static>, palette: &Palette) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .spans
        .into_iter()
        .map(|span| {
            let style = span
                .style
                .fg(palette.border)
                .remove_modifier(Modifier::BOLD);
            span.style(style)
        })
        .collect();
    Line::from(spans)
}

fn centered(text: String, style: Style, width: u16) -> Line<'static> {
    let pad = usize::from(width).saturating_sub(text.width()) / 2;
    Line::from(vec![Span::raw(" ".repeat(pad)), Span::styled(text, style)])
}

fn hero_lines(view: &HomeView<'_>, width: u16) -> Vec<Line<'static>> {
    let palette = view.palette;
    let greeting = match view.user {
        Some(user) => format!("Welcome back, {user}"),
        None => "Log in or sign up to join the conversation".to_string(),
    };
    vec![
        Line::default(),
        centered(
            "◆ N E X U S   F O R U M ◆".to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
            width,
        ),
        centered(
            "Where builders, breakers and tinkerers talk shop".to_string(),
            Style::default().fg(palette.text),
            width,
        ),
        Line::default(),
        centered(greeting, Style::default().fg(palette.muted), width),
        Line::default(),
    ]
}

fn stats_lines(view: &HomeView<'_>, width: u16) -> Vec<Line<'static>> {
    let palette = view.palette;
    let inner = usize::from(width).saturating_sub(2);
    let column = inner / 4;
    let labels = ["Members", "Threads", "Posts", "Online"];

    let mut values = vec![Span::styled("│", Style::default().fg(palette.border))];
    let mut captions = values.clone();
    for (counter, label) in view.home.counters.iter().zip(labels) {
        values.push(Span::styled(
            pad_center(&counter.display(view.now), column),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
        captions.push(Span::styled(
            pad_center(label, column),
            Style::default().fg(palette.muted),
        ));
    }
    let border = Style::default().fg(palette.border);
    vec![
        Line::from(Span::styled(format!("╭{}╮", "─".repeat(inner)), border)),
        Line::from(values),
        Line::from(captions),
        Line::from(Span::styled(format!("╰{}╯", "─".repeat(inner)), border)),
    ]
}

fn pad_center(text: &str, width: usize) -> String {
    let text = truncate_with_ellipsis(text, width);
    let total = width.saturating_sub(text.width());
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(total - left))
}

fn pad_right(text: &str, width: usize) -> String {
    let text = truncate_with_ellipsis(text, width);
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn category_lines(view: &HomeView<'_>, width: u16) -> Vec<Line<'static>> {
    let palette = view.palette;
    let columns = usize::from(view.home.geometry.category_columns.max(1));
    let column_width = usize::from(width).saturating_sub(2) / columns;

    let mut lines = vec![Line::from(Span::styled(
        " Categories",
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    ))];
    for row in view.forum.categories.chunks(columns) {
        let mut block: Vec<Vec<Span<'static>>> = vec![Vec::new(); CATEGORY_HEIGHT as usize];
        for category in row {
            let [title, detail, spacer] = category_cell(category, column_width, palette);
            block[0].extend(title);
            block[1].extend(detail);
            block[2].extend(spacer);
        }
        lines.extend(block.into_iter().map(Line::from));
    }
    lines
}

fn category_cell(
    category: &Category,
    width: usize,
    palette: &Palette,
) -> [Vec<Span<'static>>; 3] {
    let name = format!(" {} {}", category.icon, category.name);
    let counts = format!("{} threads · {} posts ", category.threads, category.posts);
    let gap = width.saturating_sub(name.width() + counts.width());
    let title = if gap == 0 {
        vec![Span::styled(
            pad_right(&name, width),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )]
    } else {
        vec![
            Span::styled(
                name,
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(gap)),
            Span::styled(counts, Style::default().fg(palette.muted)),
        ]
    };
    let detail = vec![Span::styled(
        pad_right(&format!("   {}", category.description), width),
        Style::default().fg(palette.text),
    )];
    let spacer = vec![Span::raw(" ".repeat(width))];
    [title, detail, spacer]
}

fn thread_lines(view: &HomeView<'_>, width: u16) -> Vec<Line<'static>> {
    let palette = view.palette;
    let home = view.home;
    let mut lines = vec![Line::from(Span::styled(
        " Recent discussions",
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    ))];

    let mut tabs = Vec::new();
    let mut cursor = 0u16;
    for (filter, start, tab_width) in filter_tab_spans() {
        tabs.push(Span::raw(" ".repeat(usize::from(start - cursor))));
        let style = if home.filters.is_active(filter) {
            Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        tabs.push(Span::styled(
            pad_center(filter.as_str(), usize::from(tab_width)),
            style,
        ));
        cursor = start + tab_width;
    }
    lines.push(Line::from(tabs));
    lines.push(Line::default());

    let threads = view.forum.filtered(home.filter());
    if threads.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No threads here yet",
            Style::default().fg(palette.muted),
        )));
        return lines;
    }
    for (idx, thread) in threads.into_iter().enumerate() {
        let mut entry = thread_entry(view, thread, idx == home.selected, width);
        entry.resize(THREAD_ROW_HEIGHT as usize, Line::default());
        lines.extend(entry);
    }
    lines
}

fn thread_entry(
    view: &HomeView<'_>,
    thread: &Thread,
    selected: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let palette = view.palette;
    let width = usize::from(width);
    let marker = if selected { " ▸ " } else { "   " };
    let mut badges = String::new();
    if thread.pinned {
        badges.push_str("📌 ");
    }
    if view.bookmarks.contains(&thread.id) {
        badges.push_str("🔖 ");
    }
    let votes = format!("▲ {} ", thread.votes);
    let title_room = width.saturating_sub(marker.width() + badges.width() + votes.width() + 1);
    let title = truncate_with_ellipsis(&thread.title, title_room);
    let gap = width.saturating_sub(marker.width() + badges.width() + title.width() + votes.width());

    let title_style = if selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    let category = view
        .forum
        .category(&thread.category)
        .map_or(thread.category.as_str(), |c| c.name.as_str());
    let age = format_relative(thread.created_at(view.wall_clock), view.wall_clock);
    let tags = thread
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    let meta = format!(
        "   {} · {} · {} · {} replies · {} views  {}",
        thread.author(),
        category,
        age,
        thread.reply_count(),
        thread.views,
        tags
    );

    vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.accent)),
            Span::raw(badges),
            Span::styled(title, title_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(votes, Style::default().fg(palette.secondary)),
        ]),
        Line::from(Span::styled(
            truncate_with_ellipsis(&meta, width),
            Style::default().fg(palette.muted),
        )),
    ]
}
