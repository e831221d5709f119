//! Generation provider traits
//!
//! Seams for the external services the routes delegate to. All are
//! object-safe and used with dynamic dispatch via `Arc<dyn _>`.

use async_trait::async_trait;
use bytes::Bytes;

use super::errors::ProviderError;

/// Text generation backend (chat-completion style)
#[async_trait]
pub trait ITextGenerator: Send + Sync {
    /// Generate a completion for a single user prompt, bounded by `max_tokens`.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError>;
}

/// Image operations backend
#[async_trait]
pub trait IImageStudio: Send + Sync {
    /// Render an image from a text prompt
    async fn text_to_image(&self, prompt: &str) -> Result<Bytes, ProviderError>;

    /// Remove the background from an uploaded image
    async fn remove_background(&self, image: Bytes) -> Result<Bytes, ProviderError>;

    /// Replace the background of an uploaded image according to a prompt
    async fn replace_background(&self, image: Bytes, prompt: &str)
        -> Result<Bytes, ProviderError>;
}

/// Media CDN for storing generated images
#[async_trait]
pub trait IMediaStore: Send + Sync {
    /// Upload image bytes under the given asset name; returns the public URL.
    async fn store_image(&self, image: Bytes, name: &str) -> Result<String, ProviderError>;
}
