//! Session verification against the identity provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::IdentityConfig;
use crate::domain::entitlement::UserId;
use crate::domain::identity::{ISessionVerifier, IdentityError};

/// Verifies session tokens via the provider's token-introspection endpoint
pub struct HttpSessionVerifier {
    client: Client,
    base_url: String,
    secret_key: String,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user_id: String,
}

impl HttpSessionVerifier {
    pub fn new(config: &IdentityConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        }
    }
}

#[async_trait]
impl ISessionVerifier for HttpSessionVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        let response = self
            .client
            .post(format!("{}/v1/tokens/verify", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&VerifyRequest { token })
            .send()
            .await
            .map_err(|e| IdentityError::unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                Err(IdentityError::InvalidToken)
            }
            status if status.is_success() => {
                let verified: VerifyResponse = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::unavailable(e.to_string()))?;

                UserId::new(verified.user_id).map_err(|_| IdentityError::InvalidToken)
            }
            status => {
                error!(%status, "Token verification failed");
                Err(IdentityError::unavailable(format!(
                    "Token verification returned {}",
                    status
                )))
            }
        }
    }
}
