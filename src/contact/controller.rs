//! Contact form controller
//!
//! Owns the field values, which fields are currently marked invalid, and
//! the submit lifecycle. UI adapters translate their events into
//! [`ContactController::on_blur`], [`ContactController::on_input`] and the
//! submit calls; rendering is projected through a [`FormView`].

use super::backend::{ContactMessage, SubmissionBackend, SubmissionReceipt, SubmitError};
use super::field::{FieldName, FormField};
use super::rules::{validate_field, ValidationResult};
use super::view::{FormView, SUBMIT_FAILED_ALERT};

/// Index of the submit button in the focus ring (after the three fields)
const SUBMIT_BUTTON_INDEX: usize = 3;
const FOCUS_RING_LEN: usize = 4;

/// Lifecycle of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    /// A submission is in flight; the submit control is disabled
    Submitting,
    /// Terminal: the form has been replaced by the success block
    Succeeded(SubmissionReceipt),
    /// The blocking alert is up; acknowledging it returns to `Idle`
    Failed { alert: String },
}

impl FormState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

pub struct ContactController<V: FormView> {
    fields: [FormField; 3],
    invalid: [bool; 3],
    active_index: usize,
    state: FormState,
    view: V,
}

impl<V: FormView> ContactController<V> {
    pub fn new(view: V) -> Self {
        Self {
            fields: FieldName::ALL.map(FormField::new),
            invalid: [false; 3],
            active_index: 0,
            state: FormState::Idle,
            view,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn field(&self, name: FieldName) -> &FormField {
        &self.fields[name.index()]
    }

    pub fn value(&self, name: FieldName) -> &str {
        self.fields[name.index()].as_text()
    }

    /// Whether `name` currently carries the invalid marker
    #[cfg(test)]
    pub fn is_marked_invalid(&self, name: FieldName) -> bool {
        self.invalid[name.index()]
    }

    /// Field with keyboard focus, or `None` when the submit button has it
    pub fn active_field(&self) -> Option<FieldName> {
        FieldName::from_index(self.active_index)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_index == SUBMIT_BUTTON_INDEX
    }

    #[cfg(test)]
    pub fn is_submit_enabled(&self) -> bool {
        self.state.is_idle()
    }

    /// Edits and blur/input re-validation are accepted while the form is
    /// on screen and no alert is blocking it.
    fn accepts_events(&self) -> bool {
        matches!(self.state, FormState::Idle | FormState::Submitting)
    }

    /// Run the rule for `name` against its current value
    pub fn validate_field(&self, name: FieldName) -> ValidationResult {
        validate_field(name, self.value(name))
    }

    /// Mark or clear the error on `name`. Idempotent.
    pub fn show_error(&mut self, name: FieldName, message: &str) {
        self.invalid[name.index()] = !message.is_empty();
        self.view.show_error(name, message);
    }

    fn revalidate(&mut self, name: FieldName) -> bool {
        let result = self.validate_field(name);
        tracing::debug!("Validated {name}: valid={}", result.valid);
        self.show_error(name, &result.message);
        result.valid
    }

    /// The field lost focus: always re-validate
    pub fn on_blur(&mut self, name: FieldName) {
        if !self.accepts_events() {
            return;
        }
        self.revalidate(name);
    }

    /// The field's value changed: re-validate only if it is already marked
    /// invalid, so a first attempt is not flagged mid-typing.
    pub fn on_input(&mut self, name: FieldName) {
        if !self.accepts_events() {
            return;
        }
        if self.invalid[name.index()] {
            self.revalidate(name);
        }
    }

    /// Replace a field's value and fire the input event
    #[cfg(test)]
    pub fn set_value(&mut self, name: FieldName, value: impl Into<String>) {
        if !self.accepts_events() {
            return;
        }
        self.fields[name.index()].set_text(value);
        self.on_input(name);
    }

    /// Type a character into the focused field
    pub fn type_char(&mut self, c: char) {
        if !self.accepts_events() {
            return;
        }
        if let Some(name) = self.active_field() {
            self.fields[name.index()].push_char(c);
            self.on_input(name);
        }
    }

    /// Insert a line break; only the message field is multiline
    pub fn newline(&mut self) {
        if self.active_field().is_some_and(|f| f.is_multiline()) {
            self.type_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        if !self.accepts_events() {
            return;
        }
        if let Some(name) = self.active_field() {
            if self.fields[name.index()].pop_char() {
                self.on_input(name);
            }
        }
    }

    /// Move focus to ring position `index`, blurring the field being left
    pub fn focus(&mut self, index: usize) {
        let index = index.min(SUBMIT_BUTTON_INDEX);
        if index == self.active_index {
            return;
        }
        if let Some(leaving) = self.active_field() {
            self.on_blur(leaving);
        }
        self.active_index = index;
    }

    pub fn focus_next(&mut self) {
        self.focus_wrapping((self.active_index + 1) % FOCUS_RING_LEN);
    }

    pub fn focus_prev(&mut self) {
        let prev = if self.active_index == 0 {
            FOCUS_RING_LEN - 1
        } else {
            self.active_index - 1
        };
        self.focus_wrapping(prev);
    }

    fn focus_wrapping(&mut self, index: usize) {
        if let Some(leaving) = self.active_field() {
            self.on_blur(leaving);
        }
        self.active_index = index;
    }

    /// First half of a submit: validate everything and, if the form may be
    /// sent, enter `Submitting` and hand back the payload.
    ///
    /// Returns `None` (and changes no state) when a submission is already
    /// in flight, the form is gone, an alert is up, or any field is invalid.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if !self.state.is_idle() {
            tracing::debug!("Submit ignored in state {:?}", self.state);
            return None;
        }

        // Every field is validated so all errors show up together
        let results = FieldName::ALL.map(|name| self.revalidate(name));
        if !results.iter().all(|valid| *valid) {
            tracing::debug!("Submit blocked by invalid fields");
            return None;
        }

        self.state = FormState::Submitting;
        self.view.set_submitting(true);
        tracing::info!("Submitting contact form");

        Some(ContactMessage {
            name: self.value(FieldName::Name).to_string(),
            email: self.value(FieldName::Email).to_string(),
            message: self.value(FieldName::Message).to_string(),
        })
    }

    /// Second half of a submit: apply the backend's answer
    pub fn finish_submit(&mut self, result: Result<SubmissionReceipt, SubmitError>) {
        if !self.state.is_submitting() {
            tracing::warn!("Submission result arrived in state {:?}", self.state);
            return;
        }

        match result {
            Ok(receipt) => {
                tracing::info!("Contact form sent (receipt {})", receipt.id);
                self.state = FormState::Succeeded(receipt);
                self.view.show_success();
            }
            Err(err) => {
                tracing::warn!("Contact form submission failed: {err}");
                self.view.set_submitting(false);
                self.state = FormState::Failed {
                    alert: SUBMIT_FAILED_ALERT.to_string(),
                };
                self.view.alert(SUBMIT_FAILED_ALERT);
            }
        }
    }

    /// Dismiss the failure alert; the form is editable again
    pub fn acknowledge_alert(&mut self) {
        if self.state.is_failed() {
            self.state = FormState::Idle;
            self.view.dismiss_alert();
        }
    }

    /// Full submit against `backend`, awaiting the result in place. The app
    /// drives the same steps through `begin_submit` and `finish_submit`.
    #[allow(dead_code)]
    pub async fn on_submit<B>(&mut self, backend: &B) -> &FormState
    where
        B: SubmissionBackend + ?Sized,
    {
        if let Some(message) = self.begin_submit() {
            let result = backend.submit(&message).await;
            self.finish_submit(result);
        }
        &self.state
    }
}
