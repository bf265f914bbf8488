//! Portfolio page rendering

use super::SHAPE_GUTTER_WIDTH;
use crate::app::App;
use crate::state::{LineKind, PageLine};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
    Frame,
};
use std::time::Instant;

/// Decorative background shapes: glyph, column in the gutter, resting row
const SHAPES: [(&str, u16, u16, Color); 4] = [
    ("◆", 2, 1, Color::Magenta),
    ("○", 8, 5, Color::Blue),
    ("△", 4, 9, Color::Cyan),
    ("□", 9, 13, Color::DarkGray),
];

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(SHAPE_GUTTER_WIDTH),
        ])
        .split(area);

    draw_content(frame, chunks[0], app);
    draw_shapes(frame, chunks[1], app);
}

fn draw_content(frame: &mut Frame, area: Rect, app: &App) {
    let now = Instant::now();
    let page = &app.state.page;
    let start = usize::from(page.scroll);
    let end = (start + usize::from(area.height)).min(page.lines.len());

    let lines: Vec<Line> = page.lines[start.min(end)..end]
        .iter()
        .map(|line| render_line(line, app, now))
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(paragraph, area);
}

fn render_line<'a>(line: &'a PageLine, app: &App, now: Instant) -> Line<'a> {
    let base = match line.kind {
        LineKind::Owner => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        LineKind::Tagline => Style::default().fg(Color::Gray),
        LineKind::Indicator => {
            if !app.indicator.is_visible() {
                return Line::from("");
            }
            Style::default().fg(Color::DarkGray)
        }
        LineKind::Heading => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        LineKind::Body => Style::default(),
        LineKind::Blank => return Line::from(""),
    };

    let style = match line.section {
        Some(section) => match reveal_style(base, app.reveal.progress(section, now)) {
            Some(style) => style,
            None => return Line::from(""),
        },
        None => base,
    };

    Line::from(Span::styled(line.text.as_str(), style))
}

/// Fade a section in as its reveal progresses; `None` while still hidden
fn reveal_style(base: Style, progress: f32) -> Option<Style> {
    if progress <= 0.0 {
        None
    } else if progress < 0.5 {
        Some(base.fg(Color::DarkGray))
    } else if progress < 1.0 {
        Some(base.fg(Color::Gray))
    } else {
        Some(base)
    }
}

fn draw_shapes(frame: &mut Frame, area: Rect, app: &App) {
    let offsets = app.parallax_offsets(SHAPES.len());

    for ((glyph, column, row, color), offset) in SHAPES.iter().zip(offsets) {
        let y = u32::from(*row) + offset.round().max(0.0) as u32;
        if y >= u32::from(area.height) || *column >= area.width {
            continue;
        }
        let cell = Rect {
            x: area.x + column,
            y: area.y + y as u16,
            width: 1,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(*glyph, Style::default().fg(*color))),
            cell,
        );
    }
}
