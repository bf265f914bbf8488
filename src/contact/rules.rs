//! Field validation rules
//!
//! Each rule is a pure function from the field's current text to a
//! [`ValidationResult`]. An empty message means the value is valid.

use super::field::FieldName;
use once_cell::sync::Lazy;
use regex::Regex;

/// Something, an `@`, something, a dot, something. No whitespace anywhere.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const NAME_MIN_LEN: usize = 2;
const MESSAGE_MIN_LEN: usize = 10;

/// Length as a browser reports it: UTF-16 code units, so a character outside
/// the Basic Multilingual Plane counts twice.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Outcome of running a field's rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }
}

/// Run the rule for `field` against `value`
pub fn validate_field(field: FieldName, value: &str) -> ValidationResult {
    let trimmed = value.trim();
    match field {
        FieldName::Name => {
            if trimmed.is_empty() {
                ValidationResult::fail("Name is required")
            } else if text_len(trimmed) < NAME_MIN_LEN {
                ValidationResult::fail("Name must be at least 2 characters")
            } else {
                ValidationResult::ok()
            }
        }
        FieldName::Email => {
            if trimmed.is_empty() {
                ValidationResult::fail("Email is required")
            } else if !EMAIL_PATTERN.is_match(value) {
                // matched against the raw value, so surrounding spaces fail
                ValidationResult::fail("Please enter a valid email")
            } else {
                ValidationResult::ok()
            }
        }
        FieldName::Message => {
            if trimmed.is_empty() {
                ValidationResult::fail("Message is required")
            } else if text_len(trimmed) < MESSAGE_MIN_LEN {
                ValidationResult::fail("Message must be at least 10 characters")
            } else {
                ValidationResult::ok()
            }
        }
    }
}
