//! API controllers

pub mod creations;
pub mod generation;
pub mod health;
pub mod imaging;
pub mod resume;

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::creation::{ListCommunityUseCase, ListCreationsUseCase, TogglePublishUseCase};
use crate::application::entitlement::EntitlementGate;
use crate::application::generation::{
    GenerateArticleUseCase, GenerateBlogTitlesUseCase, GenerateImageUseCase,
    RemoveBackgroundUseCase, RemoveObjectUseCase, ReviewResumeUseCase,
};
use crate::application::ApplicationError;
use crate::config::Config;
use crate::domain::creation::CreationError;
use crate::domain::entitlement::EntitlementError;
use crate::domain::identity::{ISessionVerifier, IdentityError};
use crate::presentation::models::MessageResponse;

/// Shared application state for all route handlers
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<EntitlementGate>,
    pub generate_article_use_case: Arc<GenerateArticleUseCase>,
    pub generate_blog_titles_use_case: Arc<GenerateBlogTitlesUseCase>,
    pub generate_image_use_case: Arc<GenerateImageUseCase>,
    pub remove_background_use_case: Arc<RemoveBackgroundUseCase>,
    pub remove_object_use_case: Arc<RemoveObjectUseCase>,
    pub review_resume_use_case: Arc<ReviewResumeUseCase>,
    pub list_creations_use_case: Arc<ListCreationsUseCase>,
    pub list_community_use_case: Arc<ListCommunityUseCase>,
    pub toggle_publish_use_case: Arc<TogglePublishUseCase>,
    pub session_verifier: Arc<dyn ISessionVerifier>,
    pub config: Arc<Config>,
    pub startup_time: Instant,
}

/// 400 envelope for malformed input
pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(MessageResponse::failure(message)),
    )
        .into_response()
}

/// Quota denial: a normal outcome, rendered as an actionable 200 envelope
/// rather than an error status.
pub(crate) fn quota_denied() -> Response {
    (
        StatusCode::OK,
        axum::Json(MessageResponse::failure(
            "Free usage limit reached. Upgrade to premium.",
        )),
    )
        .into_response()
}

/// Plan denial for premium-only features, same 200 envelope convention
pub(crate) fn premium_required(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        axum::Json(MessageResponse::failure(message)),
    )
        .into_response()
}

/// Map application failures to the response envelope.
///
/// Details are logged, never leaked: upstream failures become a generic
/// retryable 500, identity failures a 401, validation a 400.
pub(crate) fn map_application_error(err: ApplicationError) -> Response {
    match &err {
        ApplicationError::Validation { message } => return bad_request(message.clone()),
        ApplicationError::Identity(IdentityError::InvalidToken)
        | ApplicationError::Entitlement(EntitlementError::InvalidIdentity) => {
            return (
                StatusCode::UNAUTHORIZED,
                axum::Json(MessageResponse::failure(
                    "Unauthorized - Missing or invalid token",
                )),
            )
                .into_response();
        }
        ApplicationError::Creation(CreationError::NotFound { .. }) => {
            return (
                StatusCode::NOT_FOUND,
                axum::Json(MessageResponse::failure("Creation not found")),
            )
                .into_response();
        }
        _ => {}
    }

    error!(error = %err, "Request failed");

    let message = match &err {
        ApplicationError::Entitlement(EntitlementError::UpstreamUnavailable { .. })
        | ApplicationError::Identity(IdentityError::Unavailable { .. }) => {
            "Service temporarily unavailable. Please try again."
        }
        ApplicationError::Provider(provider) if provider.is_retryable() => {
            "Service temporarily unavailable. Please try again."
        }
        _ => "Internal server error",
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(MessageResponse::failure(message)),
    )
        .into_response()
}
