//! Entitlement domain errors

use thiserror::Error;

/// Entitlement-specific domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntitlementError {
    #[error("Invalid identity: user id must be a non-empty string")]
    InvalidIdentity,

    #[error("Unknown user: {user_id}")]
    UnknownUser { user_id: String },

    #[error("Profile store unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("Profile store does not support conditional decrement")]
    ConditionalUpdateUnsupported,
}

impl EntitlementError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Transient failures are safe to retry with backoff; the rest are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EntitlementError::UpstreamUnavailable { .. })
    }
}
