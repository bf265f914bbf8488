//! Projection of controller state onto whatever renders the form

use super::field::FieldName;

/// Heading of the block that replaces the form after a successful send
pub const SUCCESS_HEADING: &str = "Message Sent!";
/// Body text of the success block
pub const SUCCESS_BODY: &str = "Thank you for reaching out. I'll get back to you soon.";
/// Text of the blocking alert raised when a submission fails
pub const SUBMIT_FAILED_ALERT: &str = "Something went wrong. Please try again.";

/// Side of the form that the user sees.
///
/// The controller is the source of truth; it calls these after every
/// transition so the view never has to be consulted for state.
#[cfg_attr(test, mockall::automock)]
pub trait FormView {
    /// Mark `field` invalid with `message`, or clear it when `message` is empty
    fn show_error(&mut self, field: FieldName, message: &str);

    /// Disable the submit control and show the loading visual (or undo both)
    fn set_submitting(&mut self, submitting: bool);

    /// Replace the form content with the success block
    fn show_success(&mut self);

    /// Raise a blocking alert
    fn alert(&mut self, message: &str);

    /// Take down the blocking alert
    fn dismiss_alert(&mut self);
}
