//! Image generation and transformation controllers (premium only)

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use tracing::instrument;

use crate::presentation::controllers::{
    bad_request, map_application_error, premium_required, AppState,
};
use crate::presentation::extractors::AuthUser;
use crate::presentation::models::{ImageRequest, MediaResponse};

/// Resolve the caller's plan and deny non-premium users with the given message.
async fn require_premium(state: &AppState, auth: &AuthUser, denial: &str) -> Option<Response> {
    match state.gate.resolve(auth.user_id.as_str()).await {
        Ok(entitlement) if entitlement.plan().is_premium() => None,
        Ok(_) => Some(premium_required(denial)),
        Err(e) => Some(map_application_error(e.into())),
    }
}

/// POST /api/v1/ai/images - Generate an image from a prompt
#[utoipa::path(
    post,
    path = "/api/v1/ai/images",
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Image generated, or plan denial envelope", body = MediaResponse),
        (status = 400, description = "Topic and style are required"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.user_id))]
pub async fn generate_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ImageRequest>,
) -> Response {
    let (topic, style) = match (request.topic.as_deref(), request.style.as_deref()) {
        (Some(topic), Some(style)) if !topic.trim().is_empty() && !style.trim().is_empty() => {
            (topic, style)
        }
        _ => return bad_request("Topic and style are required for generating image"),
    };

    if let Some(denied) = require_premium(
        &state,
        &auth,
        "Premium plan is required for generating images",
    )
    .await
    {
        return denied;
    }

    match state
        .generate_image_use_case
        .execute(&auth.user_id, topic, style)
        .await
    {
        Ok(creation) => {
            Json(MediaResponse::new("Image generated successfully", &creation)).into_response()
        }
        Err(e) => map_application_error(e),
    }
}

/// POST /api/v1/ai/background-removal - Remove the background from an image
#[utoipa::path(
    post,
    path = "/api/v1/ai/background-removal",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Background removed, or plan denial envelope", body = MediaResponse),
        (status = 400, description = "Image is required"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, multipart), fields(user_id = %auth.user_id))]
pub async fn remove_background(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Response {
    if let Some(denied) = require_premium(
        &state,
        &auth,
        "Premium plan is required for editing images",
    )
    .await
    {
        return denied;
    }

    let fields = match read_upload_fields(multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let image = match fields.image {
        Some(image) if !image.is_empty() => image,
        _ => return bad_request("Image is required"),
    };

    match state
        .remove_background_use_case
        .execute(&auth.user_id, image)
        .await
    {
        Ok(creation) => Json(MediaResponse::new(
            "Background removed successfully",
            &creation,
        ))
        .into_response(),
        Err(e) => map_application_error(e),
    }
}

/// POST /api/v1/ai/object-removal - Replace the background of an image
#[utoipa::path(
    post,
    path = "/api/v1/ai/object-removal",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Background replaced, or plan denial envelope", body = MediaResponse),
        (status = 400, description = "Image file or prompt missing"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, multipart), fields(user_id = %auth.user_id))]
pub async fn remove_object(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Response {
    if let Some(denied) = require_premium(
        &state,
        &auth,
        "Premium plan is required for editing images",
    )
    .await
    {
        return denied;
    }

    let fields = match read_upload_fields(multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let image = match fields.image {
        Some(image) if !image.is_empty() => image,
        _ => return bad_request("Image file is required"),
    };
    let prompt = match fields.prompt {
        Some(prompt) if !prompt.trim().is_empty() => prompt,
        _ => return bad_request("Prompt text is required"),
    };

    match state
        .remove_object_use_case
        .execute(&auth.user_id, image, &prompt)
        .await
    {
        Ok(creation) => Json(MediaResponse::new(
            "Background removed successfully",
            &creation,
        ))
        .into_response(),
        Err(e) => map_application_error(e),
    }
}

/// Fields accepted on image upload routes
#[derive(Default)]
struct UploadFields {
    image: Option<Bytes>,
    prompt: Option<String>,
}

async fn read_upload_fields(mut multipart: Multipart) -> Result<UploadFields, Response> {
    let mut fields = UploadFields::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err(bad_request("Malformed multipart payload")),
        };

        match field.name() {
            Some("image") => {
                fields.image = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|_| bad_request("Malformed multipart payload"))?,
                );
            }
            Some("prompt") => {
                fields.prompt = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| bad_request("Malformed multipart payload"))?,
                );
            }
            _ => {}
        }
    }

    Ok(fields)
}
