//! Contact form domain layer
//!
//! Framework-agnostic: nothing in here knows about the terminal. The UI
//! adapter feeds events into [`ContactController`] and renders through a
//! [`FormView`].

mod backend;
mod controller;
mod field;
mod rules;
mod view;

pub use backend::{SimulatedBackend, SubmissionBackend, SubmissionReceipt, SubmitError};
pub use controller::ContactController;
pub use field::{FieldName, FormField};
pub use view::{FormView, SUCCESS_BODY, SUCCESS_HEADING};

#[cfg(test)]
pub use backend::MockSubmissionBackend;
#[cfg(test)]
pub use view::SUBMIT_FAILED_ALERT;
