//! Application state definitions

use super::page::PageState;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Scrolling portfolio page
    #[default]
    Page,
    /// Contact form
    Contact,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub page: PageState,
    /// Highlighted navigation link
    pub selected_link: usize,
    /// Status message shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(page: PageState) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn next_link(&mut self) {
        let count = self.page.sections.len();
        if count > 0 {
            self.selected_link = (self.selected_link + 1) % count;
        }
    }

    pub fn prev_link(&mut self) {
        let count = self.page.sections.len();
        if count == 0 {
            return;
        }
        if self.selected_link == 0 {
            self.selected_link = count - 1;
        } else {
            self.selected_link -= 1;
        }
    }
}
