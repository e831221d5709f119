//! Generation use cases
//!
//! Each use case drives one guarded action: build the provider prompt, call
//! the external backend, and persist the result as a creation. Entitlement
//! checks happen in the route layer before these run.

use std::sync::Arc;

use bytes::Bytes;

use crate::application::errors::ApplicationError;
use crate::domain::creation::{Creation, CreationKind, ICreationRepository};
use crate::domain::entitlement::UserId;
use crate::domain::generation::{IImageStudio, IMediaStore, ITextGenerator, ProviderError};

/// Token budget for blog-title generation
const BLOG_TITLES_MAX_TOKENS: u32 = 300;

/// Token budget for resume reviews
const RESUME_REVIEW_MAX_TOKENS: u32 = 800;

/// Maximum accepted resume upload size
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Generate a long-form article on a topic
pub struct GenerateArticleUseCase {
    text: Arc<dyn ITextGenerator>,
    creations: Arc<dyn ICreationRepository>,
}

impl GenerateArticleUseCase {
    pub fn new(text: Arc<dyn ITextGenerator>, creations: Arc<dyn ICreationRepository>) -> Self {
        Self { text, creations }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        topic: &str,
        length: u32,
    ) -> Result<Creation, ApplicationError> {
        let prompt = format!(
            "Write a detailed article about \"{}\" with approximately {} words.",
            topic, length
        );

        let content = self.text.generate(&prompt, length).await?;
        if content.trim().is_empty() {
            return Err(ProviderError::InvalidResponse("Empty completion".to_string()).into());
        }

        let creation = Creation::new(
            user_id.clone(),
            topic.to_string(),
            content,
            CreationKind::Article,
        );
        self.creations.create(&creation).await?;

        Ok(creation)
    }
}

/// Generate a numbered list of blog titles for a topic and category
pub struct GenerateBlogTitlesUseCase {
    text: Arc<dyn ITextGenerator>,
    creations: Arc<dyn ICreationRepository>,
}

impl GenerateBlogTitlesUseCase {
    pub fn new(text: Arc<dyn ITextGenerator>, creations: Arc<dyn ICreationRepository>) -> Self {
        Self { text, creations }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        topic: &str,
        category: &str,
    ) -> Result<Creation, ApplicationError> {
        let prompt = format!(
            "Generate 10 catchy, SEO-optimized blog titles for Topic: \"{}\" and Category: \
             \"{}\". Keep each under 60 characters, engaging, unique, and use formats like \
             lists, how-to, questions, or tips. Output as numbered list: 1. Title 1 2. Title 2 \
             ... 10. Title 10. Avoid repeating numbers.",
            topic, category
        );

        let content = self.text.generate(&prompt, BLOG_TITLES_MAX_TOKENS).await?;
        if content.trim().is_empty() {
            return Err(ProviderError::InvalidResponse("Empty completion".to_string()).into());
        }

        let creation = Creation::new(
            user_id.clone(),
            format!("{} | {}", topic, category),
            content,
            CreationKind::BlogTitles,
        );
        self.creations.create(&creation).await?;

        Ok(creation)
    }
}

/// Render an image from a prompt and publish it to the media CDN
pub struct GenerateImageUseCase {
    images: Arc<dyn IImageStudio>,
    media: Arc<dyn IMediaStore>,
    creations: Arc<dyn ICreationRepository>,
}

impl GenerateImageUseCase {
    pub fn new(
        images: Arc<dyn IImageStudio>,
        media: Arc<dyn IMediaStore>,
        creations: Arc<dyn ICreationRepository>,
    ) -> Self {
        Self {
            images,
            media,
            creations,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        topic: &str,
        style: &str,
    ) -> Result<Creation, ApplicationError> {
        let image = self.images.text_to_image(topic).await?;
        let url = self.media.store_image(image, &asset_name()).await?;

        let creation = Creation::new(
            user_id.clone(),
            format!("{} | {}", topic, style),
            url,
            CreationKind::Image,
        );
        self.creations.create(&creation).await?;

        Ok(creation)
    }
}

/// Strip the background from an uploaded image
pub struct RemoveBackgroundUseCase {
    images: Arc<dyn IImageStudio>,
    media: Arc<dyn IMediaStore>,
    creations: Arc<dyn ICreationRepository>,
}

impl RemoveBackgroundUseCase {
    pub fn new(
        images: Arc<dyn IImageStudio>,
        media: Arc<dyn IMediaStore>,
        creations: Arc<dyn ICreationRepository>,
    ) -> Self {
        Self {
            images,
            media,
            creations,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        image: Bytes,
    ) -> Result<Creation, ApplicationError> {
        let result = self.images.remove_background(image).await?;
        let url = self.media.store_image(result, &asset_name()).await?;

        let creation = Creation::new(
            user_id.clone(),
            "Remove background from image".to_string(),
            url,
            CreationKind::BackgroundRemoval,
        );
        self.creations.create(&creation).await?;

        Ok(creation)
    }
}

/// Replace the background of an uploaded image according to a prompt
pub struct RemoveObjectUseCase {
    images: Arc<dyn IImageStudio>,
    media: Arc<dyn IMediaStore>,
    creations: Arc<dyn ICreationRepository>,
}

impl RemoveObjectUseCase {
    pub fn new(
        images: Arc<dyn IImageStudio>,
        media: Arc<dyn IMediaStore>,
        creations: Arc<dyn ICreationRepository>,
    ) -> Self {
        Self {
            images,
            media,
            creations,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        image: Bytes,
        prompt: &str,
    ) -> Result<Creation, ApplicationError> {
        let result = self.images.replace_background(image, prompt).await?;
        let url = self.media.store_image(result, &asset_name()).await?;

        let creation = Creation::new(
            user_id.clone(),
            prompt.to_string(),
            url,
            CreationKind::ObjectRemoval,
        );
        self.creations.create(&creation).await?;

        Ok(creation)
    }
}

/// Review an uploaded resume and persist the feedback
pub struct ReviewResumeUseCase {
    text: Arc<dyn ITextGenerator>,
    creations: Arc<dyn ICreationRepository>,
}

impl ReviewResumeUseCase {
    pub fn new(text: Arc<dyn ITextGenerator>, creations: Arc<dyn ICreationRepository>) -> Self {
        Self { text, creations }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        resume: Bytes,
        content_type: &str,
    ) -> Result<Creation, ApplicationError> {
        let resume_text = extract_resume_text(&resume, content_type)?;

        let prompt = format!(
            "Please act as an expert HR and career coach. Review the following resume and \
             provide detailed feedback in these areas:\n\
             1. Overall structure and formatting\n\
             2. Clarity and readability\n\
             3. Strengths and key skills\n\
             4. Areas for improvement\n\
             5. Suggestions to make it more appealing to recruiters\n\n\
             Resume Content:\n{}",
            resume_text
        );

        let review = self.text.generate(&prompt, RESUME_REVIEW_MAX_TOKENS).await?;
        if review.trim().is_empty() {
            return Err(ProviderError::InvalidResponse("Empty completion".to_string()).into());
        }

        let creation = Creation::new(
            user_id.clone(),
            "Review of uploaded resume".to_string(),
            review.trim().to_string(),
            CreationKind::ResumeReview,
        );
        self.creations.create(&creation).await?;

        Ok(creation)
    }
}

/// Decode and sanitize resume text from an upload.
///
/// Only plain-text resumes are accepted; control characters are stripped
/// (newlines and tabs survive) before the text is handed to the provider.
fn extract_resume_text(resume: &Bytes, content_type: &str) -> Result<String, ApplicationError> {
    if resume.len() > MAX_RESUME_BYTES {
        return Err(ApplicationError::validation("File size exceeds 5MB limit"));
    }

    let text = match content_type {
        "text/plain" => String::from_utf8_lossy(resume).into_owned(),
        _ => return Err(ApplicationError::validation("Unsupported resume format")),
    };

    let sanitized: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    if sanitized.trim().is_empty() {
        return Err(ApplicationError::validation("Resume file is empty"));
    }

    Ok(sanitized)
}

/// Unique asset name for CDN uploads
fn asset_name() -> String {
    format!("quillgen-{}", uuid::Uuid::new_v4())
}
