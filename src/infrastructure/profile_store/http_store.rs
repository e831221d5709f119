//! Identity-provider metadata implementation of the profile store
//!
//! Reads the plan and free-usage fields from the provider's user-metadata API
//! and writes the counter back with a plain merge-patch. The provider offers
//! no compare-and-swap, so this store cannot support conditional decrement;
//! concurrent writers for the same user follow last-write-wins.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::IdentityConfig;
use crate::domain::entitlement::{EntitlementError, IProfileStore, UserId, UserProfile};

/// Profile store backed by the identity provider's user-metadata API
pub struct HttpProfileStore {
    client: Client,
    base_url: String,
    secret_key: String,
    timeout_seconds: u64,
}

/// Metadata fields carried on a provider user record
#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    plan: Option<String>,
    free_usage: Option<i64>,
}

/// Provider user record, reduced to the fields the gate consumes
#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    public_metadata: UserMetadata,
    #[serde(default)]
    private_metadata: UserMetadata,
}

#[derive(Debug, Serialize)]
struct MetadataPatch {
    private_metadata: FreeUsagePatch,
}

#[derive(Debug, Serialize)]
struct FreeUsagePatch {
    free_usage: i64,
}

impl HttpProfileStore {
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
            timeout_seconds: config.timeout_seconds,
        }
    }

    fn user_url(&self, user_id: &UserId) -> String {
        format!("{}/v1/users/{}", self.base_url, user_id)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> EntitlementError {
        if err.is_timeout() {
            EntitlementError::unavailable(format!(
                "Request timed out after {}s",
                self.timeout_seconds
            ))
        } else {
            EntitlementError::unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl IProfileStore for HttpProfileStore {
    async fn fetch(&self, user_id: &UserId) -> Result<UserProfile, EntitlementError> {
        let response = self
            .client
            .get(self.user_url(user_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(EntitlementError::UnknownUser {
                user_id: user_id.to_string(),
            }),
            status if status.is_success() => {
                let record: UserRecord = response
                    .json()
                    .await
                    .map_err(|e| EntitlementError::unavailable(e.to_string()))?;

                // Unparseable plan values are treated as unset rather than
                // failing resolution.
                Ok(UserProfile {
                    public_plan: record
                        .public_metadata
                        .plan
                        .as_deref()
                        .and_then(|p| p.parse().ok()),
                    private_plan: record
                        .private_metadata
                        .plan
                        .as_deref()
                        .and_then(|p| p.parse().ok()),
                    free_usage: record.private_metadata.free_usage,
                })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(%status, user_id = %user_id, "Profile fetch failed");
                Err(EntitlementError::unavailable(format!(
                    "Profile fetch returned {}: {}",
                    status, body
                )))
            }
        }
    }

    async fn write_free_usage(
        &self,
        user_id: &UserId,
        remaining: i64,
    ) -> Result<(), EntitlementError> {
        let patch = MetadataPatch {
            private_metadata: FreeUsagePatch {
                free_usage: remaining,
            },
        };

        let response = self
            .client
            .patch(format!("{}/metadata", self.user_url(user_id)))
            .bearer_auth(&self.secret_key)
            .json(&patch)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(EntitlementError::UnknownUser {
                user_id: user_id.to_string(),
            }),
            status if status.is_success() => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(%status, user_id = %user_id, "Free-usage write failed");
                Err(EntitlementError::unavailable(format!(
                    "Metadata update returned {}: {}",
                    status, body
                )))
            }
        }
    }
}
