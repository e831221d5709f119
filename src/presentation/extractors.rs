//! Authentication extractors for Axum

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::entitlement::UserId;
use crate::domain::identity::{ISessionVerifier, IdentityError};
use crate::presentation::models::MessageResponse;

/// Authenticated user resolved from the bearer session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// State for authentication extractors, injected into request extensions
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn ISessionVerifier>,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or_else(|| AuthErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Auth state not found in request extensions".to_string(),
            })?;

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AuthErrorResponse::unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(AuthErrorResponse::unauthorized)?;

        let user_id = auth_state.verifier.verify(token).await.map_err(|e| match e {
            IdentityError::InvalidToken => AuthErrorResponse::unauthorized(),
            IdentityError::Unavailable { message } => {
                tracing::error!(error = %message, "Session verification unavailable");
                AuthErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Service temporarily unavailable. Please try again.".to_string(),
                }
            }
        })?;

        Ok(AuthUser { user_id })
    }
}

/// Error response for authentication failures
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl AuthErrorResponse {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized - Missing or invalid token".to_string(),
        }
    }
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            axum::Json(MessageResponse::failure(self.message)),
        )
            .into_response()
    }
}
