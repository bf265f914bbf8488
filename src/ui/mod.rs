//! UI module for rendering the TUI

mod components;
pub mod contact_form;
mod layout;
mod page;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Rows taken by the navigation bar at the top
pub const NAV_BAR_HEIGHT: u16 = 1;
/// Rows taken by the status bar at the bottom
pub const STATUS_BAR_HEIGHT: u16 = 1;
/// Columns reserved for the parallax shapes on the right of the page
pub const SHAPE_GUTTER_WIDTH: u16 = 12;
/// Columns of the page area not available to text (gutter + padding)
pub const PAGE_CHROME_WIDTH: u16 = SHAPE_GUTTER_WIDTH + 2;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (nav_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_nav_bar(frame, nav_area, app);

    match app.state.current_view {
        View::Page => page::draw(frame, main_area, app),
        View::Contact => contact_form::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // The alert sits on top of everything until acknowledged
    if let Some(alert) = app.contact.view().alert() {
        components::render_error_dialog(frame, alert);
    }
}
