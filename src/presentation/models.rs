//! API request and response DTOs
//!
//! Every response carries the `{ success, message, ... }` envelope; guarded
//! generation routes additionally echo the plan/free-usage snapshot observed
//! at admission time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::creation::Creation;
use crate::domain::entitlement::Entitlement;

/// Generate-article request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleRequest {
    /// Article topic
    #[schema(example = "The Rust borrow checker")]
    pub topic: Option<String>,
    /// Approximate article length in words
    #[schema(example = 600)]
    pub length: Option<u32>,
}

/// Generate-blog-titles request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct BlogTitlesRequest {
    /// Blog topic
    #[schema(example = "Meal prepping")]
    pub topic: Option<String>,
    /// Blog category
    #[schema(example = "Food")]
    pub category: Option<String>,
}

/// Generate-image request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageRequest {
    /// Image subject
    #[schema(example = "A lighthouse at dawn")]
    pub topic: Option<String>,
    /// Rendering style
    #[schema(example = "watercolor")]
    pub style: Option<String>,
}

/// A persisted creation as returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct CreationDto {
    /// Creation ID
    pub id: Uuid,
    /// Owning user ID
    #[schema(example = "user_2abc")]
    pub user_id: String,
    /// Prompt or upload descriptor that produced the creation
    pub prompt: String,
    /// Generated text, or the CDN URL for media creations
    pub content: String,
    /// Creation kind
    #[schema(example = "article")]
    pub kind: String,
    /// Whether the creation is shared with the community
    pub published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&Creation> for CreationDto {
    fn from(creation: &Creation) -> Self {
        Self {
            id: creation.id.as_uuid(),
            user_id: creation.user_id.to_string(),
            prompt: creation.prompt.clone(),
            content: creation.content.clone(),
            kind: creation.kind.to_string(),
            published: creation.published,
            created_at: creation.created_at,
            updated_at: creation.updated_at,
        }
    }
}

/// Envelope for text generation responses, carrying the entitlement snapshot
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerationResponse {
    pub success: bool,
    pub message: String,
    pub creation: CreationDto,
    /// Plan observed at admission time
    #[schema(example = "free")]
    pub plan: String,
    /// Free allowance observed at admission time (pre-decrement)
    #[schema(example = 7)]
    pub free_usage: i64,
}

impl GenerationResponse {
    pub fn new(message: impl Into<String>, creation: &Creation, entitlement: &Entitlement) -> Self {
        Self {
            success: true,
            message: message.into(),
            creation: creation.into(),
            plan: entitlement.plan().to_string(),
            free_usage: entitlement.free_usage(),
        }
    }
}

/// Envelope for premium media responses (no quota snapshot; not metered)
#[derive(Debug, Serialize, ToSchema)]
pub struct MediaResponse {
    pub success: bool,
    pub message: String,
    pub creation: CreationDto,
}

impl MediaResponse {
    pub fn new(message: impl Into<String>, creation: &Creation) -> Self {
        Self {
            success: true,
            message: message.into(),
            creation: creation.into(),
        }
    }
}

/// Envelope for creation listings
#[derive(Debug, Serialize, ToSchema)]
pub struct CreationListResponse {
    pub success: bool,
    pub message: String,
    pub creations: Vec<CreationDto>,
}

impl CreationListResponse {
    pub fn new(message: impl Into<String>, creations: &[Creation]) -> Self {
        Self {
            success: true,
            message: message.into(),
            creations: creations.iter().map(CreationDto::from).collect(),
        }
    }
}

/// Bare envelope for errors and denials
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current service version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Health check timestamp
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup
    pub uptime_seconds: u64,
}
