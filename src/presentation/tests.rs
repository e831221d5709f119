use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use bytes::Bytes;
use tower::ServiceExt;

use crate::application::creation::{
    ListCommunityUseCase, ListCreationsUseCase, TogglePublishUseCase,
};
use crate::application::entitlement::EntitlementGate;
use crate::application::generation::{
    GenerateArticleUseCase, GenerateBlogTitlesUseCase, GenerateImageUseCase,
    RemoveBackgroundUseCase, RemoveObjectUseCase, ReviewResumeUseCase,
};
use crate::config::Config;
use crate::domain::entitlement::{Plan, UserId};
use crate::domain::generation::{IImageStudio, IMediaStore, ITextGenerator, ProviderError};
use crate::domain::identity::{ISessionVerifier, IdentityError};
use crate::infrastructure::persistence::InMemoryCreationRepository;
use crate::infrastructure::profile_store::InMemoryProfileStore;
use crate::presentation::{create_router, AppState};

// Stub providers for route tests

struct StubTextGenerator;

#[async_trait]
impl ITextGenerator for StubTextGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, ProviderError> {
        Ok("Generated content".to_string())
    }
}

struct StubImageStudio;

#[async_trait]
impl IImageStudio for StubImageStudio {
    async fn text_to_image(&self, _prompt: &str) -> Result<Bytes, ProviderError> {
        Ok(Bytes::from_static(b"image-bytes"))
    }

    async fn remove_background(&self, _image: Bytes) -> Result<Bytes, ProviderError> {
        Ok(Bytes::from_static(b"image-bytes"))
    }

    async fn replace_background(
        &self,
        _image: Bytes,
        _prompt: &str,
    ) -> Result<Bytes, ProviderError> {
        Ok(Bytes::from_static(b"image-bytes"))
    }
}

struct StubMediaStore;

#[async_trait]
impl IMediaStore for StubMediaStore {
    async fn store_image(&self, _image: Bytes, name: &str) -> Result<String, ProviderError> {
        Ok(format!("https://cdn.test/{}.png", name))
    }
}

/// Maps two fixed tokens to test users; everything else is invalid.
struct StaticSessionVerifier;

#[async_trait]
impl ISessionVerifier for StaticSessionVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        match token {
            "free-token" => Ok(UserId::new("user_free").unwrap()),
            "premium-token" => Ok(UserId::new("user_premium").unwrap()),
            _ => Err(IdentityError::InvalidToken),
        }
    }
}

fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

fn dummy_state(store: Arc<InMemoryProfileStore>) -> AppState {
    let creations = Arc::new(InMemoryCreationRepository::new());
    let text: Arc<dyn ITextGenerator> = Arc::new(StubTextGenerator);
    let images: Arc<dyn IImageStudio> = Arc::new(StubImageStudio);
    let media: Arc<dyn IMediaStore> = Arc::new(StubMediaStore);

    AppState {
        gate: Arc::new(EntitlementGate::new(store, 10, false)),
        generate_article_use_case: Arc::new(GenerateArticleUseCase::new(
            text.clone(),
            creations.clone(),
        )),
        generate_blog_titles_use_case: Arc::new(GenerateBlogTitlesUseCase::new(
            text.clone(),
            creations.clone(),
        )),
        generate_image_use_case: Arc::new(GenerateImageUseCase::new(
            images.clone(),
            media.clone(),
            creations.clone(),
        )),
        remove_background_use_case: Arc::new(RemoveBackgroundUseCase::new(
            images.clone(),
            media.clone(),
            creations.clone(),
        )),
        remove_object_use_case: Arc::new(RemoveObjectUseCase::new(
            images,
            media,
            creations.clone(),
        )),
        review_resume_use_case: Arc::new(ReviewResumeUseCase::new(text, creations.clone())),
        list_creations_use_case: Arc::new(ListCreationsUseCase::new(creations.clone())),
        list_community_use_case: Arc::new(ListCommunityUseCase::new(creations.clone())),
        toggle_publish_use_case: Arc::new(TogglePublishUseCase::new(creations)),
        session_verifier: Arc::new(StaticSessionVerifier),
        config: Arc::new(Config::default()),
        startup_time: Instant::now(),
    }
}

fn json_request(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_token_returns_401_envelope() {
    let app = create_router(
        dummy_state(Arc::new(InMemoryProfileStore::new())),
        &Config::default(),
    );

    let response = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            None,
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized - Missing or invalid token");
}

#[tokio::test]
async fn article_generation_charges_and_echoes_snapshot() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.set_free_usage(&uid("user_free"), 2).await;
    let app = create_router(dummy_state(store.clone()), &Config::default());

    let response = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Article generated successfully");
    assert_eq!(body["plan"], "free");
    // Pre-decrement snapshot in the envelope, decremented counter in the store.
    assert_eq!(body["free_usage"], 2);
    assert_eq!(body["creation"]["content"], "Generated content");
    assert_eq!(store.free_usage(&uid("user_free")).await, Some(1));
}

#[tokio::test]
async fn exhausted_quota_is_a_soft_denial() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.set_free_usage(&uid("user_free"), 0).await;
    let app = create_router(dummy_state(store), &Config::default());

    let response = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();

    // Quota denial is a normal outcome, not an error status.
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Free usage limit reached. Upgrade to premium.");
}

#[tokio::test]
async fn last_unit_admits_then_denies() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.set_free_usage(&uid("user_free"), 1).await;
    let state = dummy_state(store);

    let app = create_router(state.clone(), &Config::default());
    let first = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(first).await["success"], true);

    let app = create_router(state, &Config::default());
    let second = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();
    let body = response_json(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Free usage limit reached. Upgrade to premium.");
}

#[tokio::test]
async fn missing_fields_return_400() {
    let app = create_router(
        dummy_state(Arc::new(InMemoryProfileStore::new())),
        &Config::default(),
    );

    let response = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Topic and length are required");
}

#[tokio::test]
async fn image_generation_requires_premium() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.set_free_usage(&uid("user_free"), 5).await;
    let app = create_router(dummy_state(store.clone()), &Config::default());

    let response = app
        .oneshot(json_request(
            "/api/v1/ai/images",
            Some("free-token"),
            serde_json::json!({"topic": "A lighthouse", "style": "watercolor"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Premium plan is required for generating images");
    // Plan denials are not billed against the allowance.
    assert_eq!(store.free_usage(&uid("user_free")).await, Some(5));
}

#[tokio::test]
async fn premium_user_generates_images() {
    let store = Arc::new(InMemoryProfileStore::new());
    store
        .set_private_plan(&uid("user_premium"), Plan::Premium)
        .await;
    let app = create_router(dummy_state(store), &Config::default());

    let response = app
        .oneshot(json_request(
            "/api/v1/ai/images",
            Some("premium-token"),
            serde_json::json!({"topic": "A lighthouse", "style": "watercolor"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["creation"]["content"]
        .as_str()
        .unwrap()
        .starts_with("https://cdn.test/"));
}

#[tokio::test]
async fn premium_user_removes_background_via_multipart() {
    let store = Arc::new(InMemoryProfileStore::new());
    store
        .set_private_plan(&uid("user_premium"), Plan::Premium)
        .await;
    let app = create_router(dummy_state(store), &Config::default());

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"image\"; filename=\"photo.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fake-jpeg-bytes\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/ai/background-removal")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, "Bearer premium-token")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Background removed successfully");
}

#[tokio::test]
async fn creations_round_trip_through_publishing() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.set_free_usage(&uid("user_free"), 5).await;
    let state = dummy_state(store);

    // Generate one article.
    let app = create_router(state.clone(), &Config::default());
    let response = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();
    let creation_id = response_json(response).await["creation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // It shows up in the owner's listing but not in the community feed.
    let app = create_router(state.clone(), &Config::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/creations")
                .header(header::AUTHORIZATION, "Bearer free-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["creations"].as_array().unwrap().len(), 1);

    let app = create_router(state.clone(), &Config::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/creations/community")
                .header(header::AUTHORIZATION, "Bearer free-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response_json(response).await["creations"]
        .as_array()
        .unwrap()
        .is_empty());

    // Publishing makes it visible to the community.
    let app = create_router(state.clone(), &Config::default());
    let response = app
        .oneshot(json_request(
            &format!("/api/v1/creations/{}/publish", creation_id),
            Some("free-token"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["creation"]["published"], true);

    let app = create_router(state, &Config::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/creations/community")
                .header(header::AUTHORIZATION, "Bearer premium-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response_json(response).await["creations"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn foreign_creation_cannot_be_published() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.set_free_usage(&uid("user_free"), 5).await;
    store
        .set_private_plan(&uid("user_premium"), Plan::Premium)
        .await;
    let state = dummy_state(store);

    let app = create_router(state.clone(), &Config::default());
    let response = app
        .oneshot(json_request(
            "/api/v1/ai/articles",
            Some("free-token"),
            serde_json::json!({"topic": "Rust", "length": 300}),
        ))
        .await
        .unwrap();
    let creation_id = response_json(response).await["creation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let app = create_router(state, &Config::default());
    let response = app
        .oneshot(json_request(
            &format!("/api/v1/creations/{}/publish", creation_id),
            Some("premium-token"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn docs_disabled_returns_404() {
    let mut config = Config::default();
    config.server.enable_docs = false;
    let app = create_router(dummy_state(Arc::new(InMemoryProfileStore::new())), &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/docs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = create_router(
        dummy_state(Arc::new(InMemoryProfileStore::new())),
        &Config::default(),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}
