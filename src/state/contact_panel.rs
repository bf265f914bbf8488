//! Render state of the contact form, driven by the controller

use crate::contact::{FieldName, FormView};

/// What the terminal shows for the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPanel {
    errors: [Option<String>; 3],
    loading: bool,
    success: bool,
    alert: Option<String>,
}

impl ContactPanel {
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors[field.index()].as_deref()
    }

    pub fn has_error(&self, field: FieldName) -> bool {
        self.errors[field.index()].is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_button_disabled(&self) -> bool {
        self.loading || self.success
    }

    pub fn shows_success(&self) -> bool {
        self.success
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

impl FormView for ContactPanel {
    fn show_error(&mut self, field: FieldName, message: &str) {
        self.errors[field.index()] = if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        };
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.loading = submitting;
    }

    fn show_success(&mut self) {
        self.loading = false;
        self.success = true;
        self.errors = Default::default();
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }

    fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
