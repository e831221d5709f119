//! External AI provider clients

pub mod image_client;
pub mod text_client;

pub use image_client::ImageStudioClient;
pub use text_client::ChatCompletionsClient;
