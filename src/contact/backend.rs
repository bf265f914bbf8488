//! Submission backends for the contact form
//!
//! The form only ever talks to a [`SubmissionBackend`]. The shipped
//! implementation is [`SimulatedBackend`], which waits a fixed delay and
//! resolves; a real HTTP endpoint would implement the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Validated payload handed to a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Acknowledgement returned by a backend after accepting a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Reasons a submission can be rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[allow(dead_code)]
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[allow(dead_code)]
    #[error("submission backend unavailable: {0}")]
    Unavailable(String),
    #[error("submission task ended before reporting a result")]
    Interrupted,
}

/// Trait for submission endpoints, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Deliver a validated contact message
    async fn submit(&self, message: &ContactMessage) -> Result<SubmissionReceipt, SubmitError>;
}

/// Stand-in for a real endpoint: sleeps, then accepts
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    /// Delay used by the portfolio page
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, message: &ContactMessage) -> Result<SubmissionReceipt, SubmitError> {
        tracing::debug!(
            "Simulating submission from {} ({} chars)",
            message.email,
            message.message.chars().count()
        );
        tokio::time::sleep(self.delay).await;
        Ok(SubmissionReceipt::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> ContactMessage {
        ContactMessage {
            name: "Jo".to_string(),
            email: "a@b.com".to_string(),
            message: "This is long enough.".to_string(),
        }
    }

    #[test]
    fn test_default_delay_is_1500ms() {
        assert_eq!(
            SimulatedBackend::default().delay(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_zero_delay_resolves() {
        let backend = SimulatedBackend::new(Duration::ZERO);
        let result = tokio_test::block_on(backend.submit(&sample_message()));
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_only_after_delay() {
        let backend = SimulatedBackend::default();
        let message = sample_message();
        let started = tokio::time::Instant::now();
        let receipt = backend.submit(&message).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(receipt.received_at <= Utc::now());
    }

    #[test]
    fn test_receipts_are_unique() {
        assert_ne!(SubmissionReceipt::new().id, SubmissionReceipt::new().id);
    }

    #[test]
    fn test_error_display() {
        let err = SubmitError::Rejected("spam".to_string());
        assert_eq!(err.to_string(), "submission rejected: spam");
    }

    #[test]
    fn test_message_serializes_field_ids() {
        let json = serde_json::to_value(sample_message()).unwrap();
        assert_eq!(json["name"], "Jo");
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["message"], "This is long enough.");
    }
}
