//! Application layer errors

use thiserror::Error;

use crate::domain::creation::CreationError;
use crate::domain::entitlement::EntitlementError;
use crate::domain::generation::ProviderError;
use crate::domain::identity::IdentityError;

/// Application-level errors wrapping domain failures
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Entitlement error: {0}")]
    Entitlement(#[from] EntitlementError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Creation error: {0}")]
    Creation(#[from] CreationError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
