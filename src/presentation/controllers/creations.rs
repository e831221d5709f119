//! Creation listing and publishing controllers

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::creation::CreationId;
use crate::presentation::controllers::{map_application_error, AppState};
use crate::presentation::extractors::AuthUser;
use crate::presentation::models::{CreationListResponse, MediaResponse};

/// GET /api/v1/creations - List the caller's creations
#[utoipa::path(
    get,
    path = "/api/v1/creations",
    responses(
        (status = 200, description = "Creations listed", body = CreationListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "creations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn list_creations(State(state): State<AppState>, auth: AuthUser) -> Response {
    match state.list_creations_use_case.execute(&auth.user_id).await {
        Ok(creations) => {
            Json(CreationListResponse::new("Creations fetched", &creations)).into_response()
        }
        Err(e) => map_application_error(e),
    }
}

/// GET /api/v1/creations/community - List published creations
#[utoipa::path(
    get,
    path = "/api/v1/creations/community",
    responses(
        (status = 200, description = "Published creations listed", body = CreationListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "creations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn list_community(State(state): State<AppState>, _auth: AuthUser) -> Response {
    match state.list_community_use_case.execute().await {
        Ok(creations) => Json(CreationListResponse::new(
            "Community creations fetched",
            &creations,
        ))
        .into_response(),
        Err(e) => map_application_error(e),
    }
}

/// POST /api/v1/creations/{id}/publish - Toggle the publish flag
#[utoipa::path(
    post,
    path = "/api/v1/creations/{id}/publish",
    params(("id" = Uuid, Path, description = "Creation ID")),
    responses(
        (status = 200, description = "Publish flag toggled", body = MediaResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Creation not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "creations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.user_id, creation_id = %id))]
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    match state
        .toggle_publish_use_case
        .execute(&auth.user_id, &CreationId::from(id))
        .await
    {
        Ok(creation) => {
            let message = if creation.published {
                "Creation published"
            } else {
                "Creation unpublished"
            };
            Json(MediaResponse::new(message, &creation)).into_response()
        }
        Err(e) => map_application_error(e),
    }
}
