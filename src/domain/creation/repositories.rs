//! Creation repository traits

use async_trait::async_trait;

use super::entities::Creation;
use super::errors::CreationError;
use super::value_objects::CreationId;
use crate::domain::entitlement::UserId;

/// Persistence for generation results
#[async_trait]
pub trait ICreationRepository: Send + Sync {
    /// Persist a new creation
    async fn create(&self, creation: &Creation) -> Result<(), CreationError>;

    /// Find a creation by ID
    async fn find_by_id(&self, id: &CreationId) -> Result<Option<Creation>, CreationError>;

    /// All creations owned by a user, newest first
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Creation>, CreationError>;

    /// All published creations, newest first
    async fn find_published(&self) -> Result<Vec<Creation>, CreationError>;

    /// Persist an updated publish flag
    async fn update_published(&self, creation: &Creation) -> Result<(), CreationError>;
}
