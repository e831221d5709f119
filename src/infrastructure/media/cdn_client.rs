//! Media CDN upload client

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::config::MediaConfig;
use crate::domain::generation::{IMediaStore, ProviderError};

/// Uploads generated images to the media CDN and returns their public URL
pub struct MediaCdnClient {
    client: Client,
    upload_url: String,
    api_key: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl MediaCdnClient {
    pub fn new(config: &MediaConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });

        Self {
            client,
            upload_url: config.upload_url.clone(),
            api_key: config.api_key.clone(),
            folder: config.folder.clone(),
        }
    }
}

#[async_trait]
impl IMediaStore for MediaCdnClient {
    async fn store_image(&self, image: Bytes, name: &str) -> Result<String, ProviderError> {
        let part = Part::bytes(image.to_vec())
            .file_name(format!("{}.png", name))
            .mime_str("image/png")
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("folder", self.folder.clone())
            .text("public_id", name.to_string());

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        let uploaded: UploadResponse = response.json().await?;
        Ok(uploaded.secure_url)
    }
}
