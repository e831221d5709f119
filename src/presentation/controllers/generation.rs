//! Text generation controllers (articles, blog titles)

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;

use crate::presentation::controllers::{
    bad_request, map_application_error, quota_denied, AppState,
};
use crate::presentation::extractors::AuthUser;
use crate::presentation::models::{ArticleRequest, BlogTitlesRequest, GenerationResponse};

/// POST /api/v1/ai/articles - Generate an article
#[utoipa::path(
    post,
    path = "/api/v1/ai/articles",
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article generated, or quota denial envelope", body = GenerationResponse),
        (status = 400, description = "Topic and length are required"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.user_id))]
pub async fn generate_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ArticleRequest>,
) -> Response {
    let (topic, length) = match (request.topic.as_deref(), request.length) {
        (Some(topic), Some(length)) if !topic.trim().is_empty() && length > 0 => (topic, length),
        _ => return bad_request("Topic and length are required"),
    };

    let admission = match state.gate.admit_and_charge(auth.user_id.as_str()).await {
        Ok(admission) => admission,
        Err(e) => return map_application_error(e.into()),
    };
    if !admission.is_allowed() {
        return quota_denied();
    }

    match state
        .generate_article_use_case
        .execute(&auth.user_id, topic, length)
        .await
    {
        Ok(creation) => Json(GenerationResponse::new(
            "Article generated successfully",
            &creation,
            &admission.entitlement,
        ))
        .into_response(),
        Err(e) => map_application_error(e),
    }
}

/// POST /api/v1/ai/blog-titles - Generate blog titles
#[utoipa::path(
    post,
    path = "/api/v1/ai/blog-titles",
    request_body = BlogTitlesRequest,
    responses(
        (status = 200, description = "Blog titles generated, or quota denial envelope", body = GenerationResponse),
        (status = 400, description = "Topic and category are required"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.user_id))]
pub async fn generate_blog_titles(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<BlogTitlesRequest>,
) -> Response {
    let (topic, category) = match (request.topic.as_deref(), request.category.as_deref()) {
        (Some(topic), Some(category))
            if !topic.trim().is_empty() && !category.trim().is_empty() =>
        {
            (topic, category)
        }
        _ => return bad_request("Topic and category are required"),
    };

    let admission = match state.gate.admit_and_charge(auth.user_id.as_str()).await {
        Ok(admission) => admission,
        Err(e) => return map_application_error(e.into()),
    };
    if !admission.is_allowed() {
        return quota_denied();
    }

    match state
        .generate_blog_titles_use_case
        .execute(&auth.user_id, topic, category)
        .await
    {
        Ok(creation) => Json(GenerationResponse::new(
            "Blog titles generated successfully",
            &creation,
            &admission.entitlement,
        ))
        .into_response(),
        Err(e) => map_application_error(e),
    }
}
