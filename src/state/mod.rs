//! Application state module

mod app_state;
mod contact_panel;
mod page;

pub use app_state::*;
pub use contact_panel::*;
pub use page::*;
