//! Generation provider errors
//!
//! Typed errors for outbound provider calls (text generation, image
//! operations, media uploads), enabling recovery decisions at the call site.

use thiserror::Error;

/// Provider operation error
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited(_)
                | ProviderError::Network(_)
                | ProviderError::Timeout { .. }
                | ProviderError::ServiceUnavailable(_)
        )
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Map an HTTP status from a provider to the matching error variant.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => ProviderError::Authentication(body),
            429 => ProviderError::RateLimited(body),
            500..=599 => ProviderError::ServiceUnavailable(body),
            _ => ProviderError::InvalidRequest(body),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout { seconds: 0 }
        } else if err.is_connect() {
            ProviderError::Network(format!("Connection failed: {}", err))
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ProviderError::network("connection reset").is_retryable());
        assert!(ProviderError::Timeout { seconds: 30 }.is_retryable());
        assert!(ProviderError::RateLimited("quota".into()).is_retryable());

        assert!(!ProviderError::Authentication("bad key".into()).is_retryable());
        assert!(!ProviderError::InvalidRequest("bad params".into()).is_retryable());
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ProviderError::from_status(401, "no"),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "slow down"),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            ProviderError::from_status(503, "down"),
            ProviderError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ProviderError::from_status(400, "bad"),
            ProviderError::InvalidRequest(_)
        ));
    }
}
