//! Route definitions and router assembly

use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::{
    controllers::{
        creations::{list_community, list_creations, toggle_publish},
        generation::{generate_article, generate_blog_titles},
        health::health_check,
        imaging::{generate_image, remove_background, remove_object},
        resume::review_resume,
        AppState,
    },
    extractors::AuthState,
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::generation::generate_article,
        crate::presentation::controllers::generation::generate_blog_titles,
        crate::presentation::controllers::imaging::generate_image,
        crate::presentation::controllers::imaging::remove_background,
        crate::presentation::controllers::imaging::remove_object,
        crate::presentation::controllers::resume::review_resume,
        crate::presentation::controllers::creations::list_creations,
        crate::presentation::controllers::creations::list_community,
        crate::presentation::controllers::creations::toggle_publish,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            ArticleRequest,
            BlogTitlesRequest,
            ImageRequest,
            CreationDto,
            GenerationResponse,
            MediaResponse,
            CreationListResponse,
            MessageResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "ai", description = "Gated AI generation endpoints"),
        (name = "creations", description = "Stored generation results and community publishing"),
        (name = "health", description = "System health monitoring")
    ),
    info(
        title = "Quillgen API",
        version = "0.1.0",
        description = "AI content studio API: text and image generation behind free/premium entitlements."
    )
)]
pub struct ApiDoc;

/// Middleware to inject AuthState into request extensions
async fn inject_auth_state_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_state = AuthState {
        verifier: app_state.session_verifier.clone(),
    };
    request.extensions_mut().insert(auth_state);
    next.run(request).await
}

/// Create the application router with the middleware stack
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let ai_routes = Router::new()
        .route("/ai/articles", post(generate_article))
        .route("/ai/blog-titles", post(generate_blog_titles))
        .route("/ai/images", post(generate_image))
        .route("/ai/background-removal", post(remove_background))
        .route("/ai/object-removal", post(remove_object))
        .route("/ai/resume-reviews", post(review_resume));

    let creation_routes = Router::new()
        .route("/creations", get(list_creations))
        .route("/creations/community", get(list_community))
        .route("/creations/{id}/publish", post(toggle_publish));

    // Build CORS layer from configuration
    let cors_layer =
        if config.server.allowed_origins.len() == 1 && config.server.allowed_origins[0] == "*" {
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(false)
                .max_age(Duration::from_secs(3600))
        } else {
            let mut layer = CorsLayer::new();
            for origin in &config.server.allowed_origins {
                match axum::http::HeaderValue::from_str(origin) {
                    Ok(origin_header) => {
                        layer = layer.allow_origin(origin_header);
                    }
                    Err(_) => {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    }
                }
            }
            layer
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(false)
                .max_age(Duration::from_secs(3600))
        };

    let mut router = Router::new()
        .nest("/api/v1", ai_routes.merge(creation_routes))
        .route("/health", get(health_check));

    // Conditionally expose Swagger UI (avoid leaking docs in production).
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        // HTTP tracing
        .layer(TraceLayer::new_for_http())
        // CORS handling
        .layer(cors_layer)
        // Global request timeout
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        // Upload size cap
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        // Inject auth state into request extensions
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            inject_auth_state_middleware,
        ));

    router.layer(service_builder).with_state(app_state)
}
