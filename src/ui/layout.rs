//! Layout components (navigation bar, status bar)

use super::{NAV_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into navigation bar, main content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAV_BAR_HEIGHT),    // Nav bar
            Constraint::Min(0),                    // Content
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the anchor links; positions match `PageState::nav_links`
pub fn draw_nav_bar(frame: &mut Frame, area: Rect, app: &App) {
    let on_page = app.state.current_view == View::Page;
    let mut spans = vec![Span::raw(" ")];

    for (idx, link) in app.state.page.nav_links().iter().enumerate() {
        let style = if on_page && idx == app.state.selected_link {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {} ", link.label), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}

/// Draw the status bar with key hints and the latest status message
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match app.state.current_view {
        View::Page => "↑↓ scroll  ←→ select  Enter/1-9 jump  c contact  q quit".to_string(),
        View::Contact => {
            format!("Tab next field  {SUBMIT_SHORTCUT} send  Esc back to page")
        }
    };

    let mut spans = vec![Span::styled(
        format!(" {hints}"),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(message) = &app.state.status_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
