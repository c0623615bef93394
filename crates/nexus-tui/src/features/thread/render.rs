use std::time::Instant;

use chrono::{DateTime, Utc};
use nexus_core::forum::{CodeBlock, Forum, Post, Thread};
use nexus_core::widgets::{VoteDirection, format_relative};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::state::{PostVotes, REPLY_BOX_HEIGHT, ThreadView};
use crate::common::{Palette, Scrollbar, truncate_with_ellipsis, wrap};
use crate::overlays::render_utils::{InputLine, render_input_line};

const INDENT: &str = "   ";

pub struct ThreadRender<'a> {
    pub forum: &'a Forum,
    pub thread: &'a Thread,
    pub view: &'a ThreadView,
    pub votes: &'a PostVotes,
    pub palette: &'a Palette,
    pub bookmarked: bool,
    pub now: Instant,
    pub wall_clock: DateTime<Utc>,
}

/// Laid-out thread content.
pub struct ThreadPage {
    pub lines: Vec<Line<'static>>,
    pub post_tops: Vec<u32>,
}

/// Splits the body area into the scrolling content and the reply box.
pub fn split_body(area: Rect) -> (Rect, Rect) {
    let reply_height = REPLY_BOX_HEIGHT.min(area.height);
    let content = Rect::new(
        area.x,
        area.y,
        area.width,
        area.height - reply_height,
    );
    let reply = Rect::new(area.x, area.y + content.height, area.width, reply_height);
    (content, reply)
}

/// Width available to thread text inside `content`.
pub fn text_width(content: Rect) -> u16 {
    content.width.saturating_sub(1)
}

pub fn render(frame: &mut Frame, area: Rect, ctx: &ThreadRender<'_>) {
    if area.width < 4 || area.height == 0 {
        return;
    }
    let (content, reply) = split_body(area);
    let text = Rect::new(content.x, content.y, text_width(content), content.height);
    let page = page(ctx, text.width);
    let total = page.lines.len();

    frame.render_widget(
        Paragraph::new(page.lines).scroll((ctx.view.scroll.min(u32::from(u16::MAX)) as u16, 0)),
        text,
    );
    frame.render_widget(
        Scrollbar::new(total, content.height as usize, ctx.view.scroll as usize)
            .style(Style::default().fg(ctx.palette.border)),
        content,
    );
    render_reply_box(frame, reply, ctx);
}

fn render_reply_box(frame: &mut Frame, area: Rect, ctx: &ThreadRender<'_>) {
    if area.height == 0 {
        return;
    }
    let palette = ctx.palette;
    let border = if ctx.view.reply_focused {
        palette.accent
    } else {
        palette.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(" Reply ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_input_line(
        frame,
        inner,
        &InputLine {
            label: "›",
            value: ctx.view.reply.value(),
            placeholder: if ctx.view.reply_focused {
                "Share your thoughts… (Enter to post, Esc to cancel)"
            } else {
                "Press r to write a reply"
            },
            focused: ctx.view.reply_focused,
            palette,
        },
    );
}

/// Builds every content line and the first line of each post.
pub fn page(ctx: &ThreadRender<'_>, width: u16) -> ThreadPage {
    let palette = ctx.palette;
    let thread = ctx.thread;
    let width = usize::from(width);
    let mut lines = Vec::new();

    let category = ctx
        .forum
        .category(&thread.category)
        .map_or(thread.category.as_str(), |c| c.name.as_str());
    lines.push(Line::from(vec![
        Span::styled(" ← Home", Style::default().fg(palette.accent)),
        Span::styled(format!(" › {category}"), Style::default().fg(palette.muted)),
    ]));
    lines.push(Line::default());

    let mut title = String::from(" ");
    if thread.pinned {
        title.push_str("📌 ");
    }
    if ctx.bookmarked {
        title.push_str("🔖 ");
    }
    title.push_str(&thread.title);
    for row in wrap(&title, width) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let tags = thread
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    let meta = format!(
        " {} · {} · {} replies · {} views  {}",
        thread.author(),
        format_relative(thread.created_at(ctx.wall_clock), ctx.wall_clock),
        thread.reply_count(),
        thread.views,
        tags
    );
    lines.push(Line::from(Span::styled(
        truncate_with_ellipsis(&meta, width),
        Style::default().fg(palette.muted),
    )));
    lines.push(Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(palette.border),
    )));
    lines.push(Line::default());

    let mut post_tops = Vec::with_capacity(thread.posts.len());
    for (idx, post) in thread.posts.iter().enumerate() {
        post_tops.push(lines.len() as u32);
        lines.extend(post_lines(ctx, idx, post, width));
        lines.push(Line::default());
    }

    ThreadPage { lines, post_tops }
}

fn post_lines(ctx: &ThreadRender<'_>, idx: usize, post: &Post, width: usize) -> Vec<Line<'static>> {
    let palette = ctx.palette;
    let selected = idx == ctx.view.selected_post;
    let marker = if selected { " ▸ " } else { "   " };
    let author_style = if selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
    };
    let label = if idx == 0 {
        "Original post".to_string()
    } else {
        format!("#{idx}")
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(post.author.clone(), author_style),
        Span::styled(
            format!(
                "  {} · {} · {label}",
                post.author_title,
                format_relative(post.posted_at(ctx.wall_clock), ctx.wall_clock)
            ),
            Style::default().fg(palette.muted),
        ),
    ])];

    let body_width = width.saturating_sub(INDENT.len());
    for row in wrap(&post.body, body_width) {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(row, Style::default().fg(palette.text)),
        ]));
    }

    if let Some(code) = &post.code {
        let copied = ctx.view.copied_label_visible(idx, ctx.now);
        lines.extend(code_lines(code, body_width, copied, palette));
    }

    lines.push(vote_line(ctx, idx));
    lines
}

fn code_lines(
    code: &CodeBlock,
    width: usize,
    copied: bool,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let border = Style::default().fg(palette.border);
    let inner = width.saturating_sub(2);
    let language = if code.language.is_empty() {
        "code".to_string()
    } else {
        code.language.clone()
    };
    let action = if copied { " ✓ Copied! " } else { " [c] copy " };
    let label = format!("─ {language} ");
    let fill = inner.saturating_sub(label.width() + action.width());

    let mut lines = vec![Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("╭{label}{}", "─".repeat(fill)), border),
        Span::styled(
            action,
            Style::default().fg(if copied {
                palette.success
            } else {
                palette.muted
            }),
        ),
        Span::styled("╮", border),
    ])];
    let text_width = inner.saturating_sub(2);
    for source_line in code.source.lines() {
        let shown = truncate_with_ellipsis(source_line, text_width);
        let pad = text_width.saturating_sub(shown.width());
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled("│ ", border),
            Span::styled(shown, Style::default().fg(palette.secondary)),
            Span::raw(" ".repeat(pad)),
            Span::styled(" │", border),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("╰{}╯", "─".repeat(inner)), border),
    ]));
    lines
}

fn vote_line(ctx: &ThreadRender<'_>, idx: usize) -> Line<'static> {
    let palette = ctx.palette;
    let state = ctx.votes.get(&ctx.thread.id, idx);
    let active = state.and_then(|s| s.active());
    let bumped = state.is_some_and(|s| s.is_bumped(ctx.now));
    let count = ctx.votes.count(ctx.thread, idx);

    let arrow = |direction: VoteDirection, glyph: &'static str| {
        let style = if active == Some(direction) {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        Span::styled(glyph, style)
    };
    let count_style = if bumped {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(palette.text)
    };

    Line::from(vec![
        Span::raw(INDENT),
        arrow(VoteDirection::Up, "▲"),
        Span::styled(format!(" {count} "), count_style),
        arrow(VoteDirection::Down, "▼"),
    ])
}

#[cfg(test)]
mod tests {
    use nexus_core::widgets::Theme;

    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_post_tops_point_at_post_headers() {
        let forum = Forum::builtin().unwrap();
        let thread = forum
            .threads
            .iter()
            .find(|t| t.posts.len() > 1)
            .unwrap();
        let view = ThreadView::new(thread.id.clone());
        let votes = PostVotes::default();
        let palette = Palette::for_theme(Theme::Dark, false);
        let ctx = ThreadRender {
            forum: &forum,
            thread,
            view: &view,
            votes: &votes,
            palette: &palette,
            bookmarked: false,
            now: Instant::now(),
            wall_clock: Utc::now(),
        };
        let page = page(&ctx, 80);
        assert_eq!(page.post_tops.len(), thread.posts.len());
        for (top, post) in page.post_tops.iter().zip(&thread.posts) {
            assert!(line_text(&page.lines[*top as usize]).contains(&post.author));
        }
    }

    #[test]
    fn test_code_block_shows_copied_label() {
        let palette = Palette::for_theme(Theme::Dark, false);
        let code = CodeBlock {
            language: "rust".to_string(),
            source: "fn main() {}".to_string(),
        };
        let idle = code_lines(&code, 40, false, &palette);
        assert!(line_text(&idle[0]).contains("[c] copy"));
        assert_eq!(idle.len(), 3);
        let copied = code_lines(&code, 40, true, &palette);
        assert!(line_text(&copied[0]).contains("Copied!"));
    }

    #[test]
    fn test_split_body_reserves_reply_box() {
        let (content, reply) = split_body(Rect::new(0, 4, 80, 20));
        assert_eq!(content, Rect::new(0, 4, 80, 20 - REPLY_BOX_HEIGHT));
        assert_eq!(reply.y, 4 + content.height);
        assert_eq!(reply.height, REPLY_BOX_HEIGHT);
    }
}
