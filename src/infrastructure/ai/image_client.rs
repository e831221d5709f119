//! Image operations client
//!
//! Talks to an API exposing text-to-image, background-removal, and
//! background-replacement endpoints with `x-api-key` authentication.
//! Responses are raw image bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::error;

use crate::config::ImageProviderConfig;
use crate::domain::generation::{IImageStudio, ProviderError};

/// Image operations client
pub struct ImageStudioClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ImageStudioClient {
    pub fn new(config: &ImageProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn image_part(image: Bytes) -> Result<Part, ProviderError> {
        Part::bytes(image.to_vec())
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))
    }

    async fn submit(&self, path: &str, form: Form) -> Result<Bytes, ProviderError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Empty image response".to_string(),
            ));
        }

        Ok(bytes)
    }
}

#[async_trait]
impl IImageStudio for ImageStudioClient {
    async fn text_to_image(&self, prompt: &str) -> Result<Bytes, ProviderError> {
        let form = Form::new().text("prompt", prompt.to_string());
        self.submit("text-to-image/v1", form).await
    }

    async fn remove_background(&self, image: Bytes) -> Result<Bytes, ProviderError> {
        let form = Form::new().part("image_file", Self::image_part(image)?);
        self.submit("remove-background/v1", form).await
    }

    async fn replace_background(
        &self,
        image: Bytes,
        prompt: &str,
    ) -> Result<Bytes, ProviderError> {
        let form = Form::new()
            .part("image_file", Self::image_part(image)?)
            .text("prompt", prompt.to_string());
        self.submit("replace-background/v1", form).await
    }
}
