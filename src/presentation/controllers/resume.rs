//! Resume review controller (premium only)

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;

use crate::presentation::controllers::{
    bad_request, map_application_error, premium_required, AppState,
};
use crate::presentation::extractors::AuthUser;
use crate::presentation::models::MediaResponse;

/// POST /api/v1/ai/resume-reviews - Review an uploaded resume
#[utoipa::path(
    post,
    path = "/api/v1/ai/resume-reviews",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Review generated, or plan denial envelope", body = MediaResponse),
        (status = 400, description = "Resume file missing, empty, or unsupported"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, multipart), fields(user_id = %auth.user_id))]
pub async fn review_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Response {
    match state.gate.resolve(auth.user_id.as_str()).await {
        Ok(entitlement) if entitlement.plan().is_premium() => {}
        Ok(_) => return premium_required("Premium plan required for resume review"),
        Err(e) => return map_application_error(e.into()),
    }

    let mut resume = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return bad_request("Malformed multipart payload"),
        };

        if field.name() == Some("resume") {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(_) => return bad_request("Malformed multipart payload"),
            };
            resume = Some((bytes, content_type));
        }
    }

    let (bytes, content_type) = match resume {
        Some(resume) => resume,
        None => return bad_request("Resume file is required"),
    };

    match state
        .review_resume_use_case
        .execute(&auth.user_id, bytes, &content_type)
        .await
    {
        Ok(creation) => Json(MediaResponse::new(
            "Resume review generated and saved successfully",
            &creation,
        ))
        .into_response(),
        Err(e) => map_application_error(e),
    }
}
