//! Application setup and wiring

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;

use crate::application::creation::{
    ListCommunityUseCase, ListCreationsUseCase, TogglePublishUseCase,
};
use crate::application::entitlement::EntitlementGate;
use crate::application::generation::{
    GenerateArticleUseCase, GenerateBlogTitlesUseCase, GenerateImageUseCase,
    RemoveBackgroundUseCase, RemoveObjectUseCase, ReviewResumeUseCase,
};
use crate::config::{Config, ProfileStoreBackend};
use crate::domain::creation::ICreationRepository;
use crate::domain::entitlement::IProfileStore;
use crate::domain::generation::{IImageStudio, IMediaStore, ITextGenerator};
use crate::domain::identity::ISessionVerifier;
use crate::infrastructure::ai::{ChatCompletionsClient, ImageStudioClient};
use crate::infrastructure::identity::HttpSessionVerifier;
use crate::infrastructure::media::MediaCdnClient;
use crate::infrastructure::persistence::SqlxCreationRepository;
use crate::infrastructure::profile_store::{HttpProfileStore, SqlxProfileStore};
use crate::presentation::{create_router, AppState};

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Create the application router and return an AppHandle for shutdown coordination
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let startup_time = Instant::now();
    let config_arc = Arc::new(config.clone());
    let shutdown_token = CancellationToken::new();

    // Initialize database pool
    let db_pool = Arc::new(
        PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database.connect_timeout_seconds,
            ))
            .connect(&config.database.url)
            .await?,
    );

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!().run(&*db_pool).await?;
    }

    // Select the profile store backend for the entitlement gate
    let profile_store: Arc<dyn IProfileStore> = match config.quota.backend {
        ProfileStoreBackend::Identity => {
            tracing::info!("Using identity-provider metadata as the profile store");
            Arc::new(HttpProfileStore::new(&config.identity))
        }
        ProfileStoreBackend::Postgres => {
            tracing::info!("Using Postgres as the profile store");
            Arc::new(SqlxProfileStore::new(db_pool.clone()))
        }
    };

    let gate = Arc::new(EntitlementGate::new(
        profile_store,
        config.quota.default_free_allowance,
        config.quota.conditional_decrement,
    ));

    // Initialize provider clients
    let text: Arc<dyn ITextGenerator> = Arc::new(ChatCompletionsClient::new(&config.providers.text));
    let images: Arc<dyn IImageStudio> = Arc::new(ImageStudioClient::new(&config.providers.image));
    let media: Arc<dyn IMediaStore> = Arc::new(MediaCdnClient::new(&config.media));

    let session_verifier: Arc<dyn ISessionVerifier> =
        Arc::new(HttpSessionVerifier::new(&config.identity));

    let creations: Arc<dyn ICreationRepository> =
        Arc::new(SqlxCreationRepository::new(db_pool.clone()));

    // Wire use cases
    let app_state = AppState {
        gate,
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
        session_verifier,
        config: config_arc.clone(),
        startup_time,
    };

    let router = create_router(app_state, &config_arc);

    Ok(AppHandle {
        router,
        shutdown_token,
    })
}
