//! Identity domain: session verification against the external provider

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entitlement::UserId;

/// Identity verification errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentityError {
    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("Identity provider unavailable: {message}")]
    Unavailable { message: String },
}

impl IdentityError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Verifies an inbound session token and yields the user it belongs to.
#[async_trait]
pub trait ISessionVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError>;
}
