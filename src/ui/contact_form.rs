//! Contact form rendering

use super::components::{render_button, BUTTON_HEIGHT};
use super::NAV_BAR_HEIGHT;
use crate::app::App;
use crate::contact::{FieldName, FormField, SUCCESS_BODY, SUCCESS_HEADING};
use crate::platform::SUBMIT_SHORTCUT;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SINGLE_LINE_HEIGHT: u16 = 3;
const MESSAGE_HEIGHT: u16 = 7;
const ERROR_LINE_HEIGHT: u16 = 1;
const BUTTON_WIDTH: u16 = 24;
/// First column inside the form's left border
const FORM_LEFT: u16 = 1;

const SUBMIT_INDEX: usize = 3;

/// Rows taken by each focus target (input + its error line, then the button)
const FOCUS_ROWS: [u16; 4] = [
    SINGLE_LINE_HEIGHT + ERROR_LINE_HEIGHT,
    SINGLE_LINE_HEIGHT + ERROR_LINE_HEIGHT,
    MESSAGE_HEIGHT + ERROR_LINE_HEIGHT,
    BUTTON_HEIGHT,
];

/// Map a screen cell to a focus index (0-2 fields, 3 the submit button).
/// Inputs span the form's width; the button only its own columns.
pub fn focus_index_at(column: u16, row: u16) -> Option<usize> {
    // form block border sits right under the nav bar
    let mut top = NAV_BAR_HEIGHT + 1;
    if row < top {
        return None;
    }
    for (idx, height) in FOCUS_ROWS.iter().enumerate() {
        if row < top + height {
            if idx == SUBMIT_INDEX && !(FORM_LEFT..FORM_LEFT + BUTTON_WIDTH).contains(&column) {
                return None;
            }
            return Some(idx);
        }
        top += height;
    }
    None
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Contact ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.contact.view().shows_success() {
        draw_success(frame, inner);
    } else {
        draw_fields(frame, inner, app);
    }
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SINGLE_LINE_HEIGHT), // Name
            Constraint::Length(ERROR_LINE_HEIGHT),
            Constraint::Length(SINGLE_LINE_HEIGHT), // Email
            Constraint::Length(ERROR_LINE_HEIGHT),
            Constraint::Length(MESSAGE_HEIGHT), // Message
            Constraint::Length(ERROR_LINE_HEIGHT),
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),                // Help text
        ])
        .split(area);

    let contact = &app.contact;
    let panel = contact.view();
    for field in FieldName::ALL {
        let row = field.index() * 2;
        let is_active = contact.active_field() == Some(field);
        draw_field(
            frame,
            chunks[row],
            contact.field(field),
            is_active,
            panel.has_error(field),
        );
        draw_error_line(frame, chunks[row + 1], panel.error(field));
    }

    let label = if panel.is_loading() {
        "Sending..."
    } else {
        "Send Message"
    };
    let button_area = Rect {
        width: chunks[6].width.min(BUTTON_WIDTH),
        ..chunks[6]
    };
    render_button(
        frame,
        button_area,
        label,
        contact.is_submit_focused(),
        !panel.is_button_disabled(),
    );

    draw_help_text(frame, chunks[7]);
}

/// Draw a form input; invalid inputs get a red border
fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, has_error: bool) {
    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_span = Span::styled(cursor, Style::default().fg(Color::Cyan));

    let mut lines: Vec<Line> = field
        .as_text()
        .split('\n')
        .map(|l| Line::from(Span::styled(l, text_style)))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor_span);
    }
    if !field.is_multiline() {
        lines.truncate(1);
    }

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Red)),
            area,
        );
    }
}

fn draw_help_text(frame: &mut Frame, area: Rect) {
    let help = format!("Tab: next field | Enter: send ({SUBMIT_SHORTCUT} anywhere) | Esc: back");
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// The form's terminal state: icon, heading and thank-you text
fn draw_success(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✔",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            SUCCESS_HEADING,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(SUCCESS_BODY),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_above_form_hit_nothing() {
        assert_eq!(focus_index_at(10, 0), None);
        assert_eq!(focus_index_at(10, 1), None);
    }

    #[test]
    fn test_rows_map_to_fields_and_button() {
        assert_eq!(focus_index_at(10, 2), Some(0));
        assert_eq!(focus_index_at(10, 5), Some(0));
        assert_eq!(focus_index_at(10, 6), Some(1));
        assert_eq!(focus_index_at(10, 10), Some(2));
        assert_eq!(focus_index_at(10, 17), Some(2));
        assert_eq!(focus_index_at(10, 18), Some(3));
        assert_eq!(focus_index_at(10, 20), Some(3));
        assert_eq!(focus_index_at(10, 21), None);
    }

    #[test]
    fn test_button_row_only_hits_button_columns() {
        assert_eq!(focus_index_at(0, 19), None);
        assert_eq!(focus_index_at(1, 19), Some(3));
        assert_eq!(focus_index_at(24, 19), Some(3));
        assert_eq!(focus_index_at(25, 19), None);
        assert_eq!(focus_index_at(60, 19), None);
        // inputs take clicks across the whole row
        assert_eq!(focus_index_at(60, 7), Some(1));
    }
}
