//! Configuration validation module

use crate::config::{
    DatabaseConfig, IdentityConfig, MediaConfig, ProvidersConfig, QuotaConfig, ServerConfig,
};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Database configuration error: {message}")]
    Database { message: String },

    #[error("Identity configuration error: {message}")]
    Identity { message: String },

    #[error("Quota configuration error: {message}")]
    Quota { message: String },

    #[error("Provider configuration error: {message}")]
    Provider { message: String },

    #[error("Media configuration error: {message}")]
    Media { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    pub fn quota(message: impl Into<String>) -> Self {
        Self::Quota {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn media(message: impl Into<String>) -> Self {
        Self::Media {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // Note: u16 cannot exceed 65535, so only 0 needs rejecting
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.trim().is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than zero",
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(ValidationError::server(
                "Max upload size must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::database("Database URL cannot be empty"));
        }

        if self.max_connections == 0 {
            return Err(ValidationError::database(
                "Max connections must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl Validate for IdentityConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::identity(
                "Identity provider base URL cannot be empty",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::identity(
                "Identity timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl Validate for QuotaConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.default_free_allowance < 0 {
            return Err(ValidationError::quota(format!(
                "Default free allowance must be non-negative, got {}",
                self.default_free_allowance
            )));
        }

        Ok(())
    }
}

impl Validate for ProvidersConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.text.base_url.trim().is_empty() {
            return Err(ValidationError::provider(
                "Text provider base URL cannot be empty",
            ));
        }

        if self.text.model.trim().is_empty() {
            return Err(ValidationError::provider(
                "Text provider model cannot be empty",
            ));
        }

        if !(0.0..=2.0).contains(&self.text.temperature) {
            return Err(ValidationError::provider(format!(
                "Text provider temperature must be in range 0.0-2.0, got {}",
                self.text.temperature
            )));
        }

        if self.image.base_url.trim().is_empty() {
            return Err(ValidationError::provider(
                "Image provider base URL cannot be empty",
            ));
        }

        Ok(())
    }
}

impl Validate for MediaConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_url.trim().is_empty() {
            return Err(ValidationError::media("Upload URL cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_allowance() {
        let mut config = Config::default();
        config.quota.default_free_allowance = -1;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Quota { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut config = Config::default();
        config.providers.text.temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Provider { .. })
        ));
    }
}
