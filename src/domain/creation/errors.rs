//! Creation domain errors

use thiserror::Error;

/// Creation-specific domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreationError {
    #[error("Creation not found: {id}")]
    NotFound { id: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },
}

impl CreationError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }
}
