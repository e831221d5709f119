//! Health check controller

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::presentation::controllers::AppState;
use crate::presentation::models::HealthResponse;

/// GET /health - Service health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.startup_time.elapsed().as_secs(),
    })
}
