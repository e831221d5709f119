//! Creation listing and publishing use cases

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::creation::{Creation, CreationError, CreationId, ICreationRepository};
use crate::domain::entitlement::UserId;

/// List the caller's own creations, newest first
pub struct ListCreationsUseCase {
    creations: Arc<dyn ICreationRepository>,
}

impl ListCreationsUseCase {
    pub fn new(creations: Arc<dyn ICreationRepository>) -> Self {
        Self { creations }
    }

    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<Creation>, ApplicationError> {
        Ok(self.creations.find_by_user(user_id).await?)
    }
}

/// List community-published creations, newest first
pub struct ListCommunityUseCase {
    creations: Arc<dyn ICreationRepository>,
}

impl ListCommunityUseCase {
    pub fn new(creations: Arc<dyn ICreationRepository>) -> Self {
        Self { creations }
    }

    pub async fn execute(&self) -> Result<Vec<Creation>, ApplicationError> {
        Ok(self.creations.find_published().await?)
    }
}

/// Toggle the publish flag on a creation the caller owns
pub struct TogglePublishUseCase {
    creations: Arc<dyn ICreationRepository>,
}

impl TogglePublishUseCase {
    pub fn new(creations: Arc<dyn ICreationRepository>) -> Self {
        Self { creations }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        id: &CreationId,
    ) -> Result<Creation, ApplicationError> {
        let mut creation = self
            .creations
            .find_by_id(id)
            .await?
            .ok_or_else(|| CreationError::NotFound { id: id.to_string() })?;

        // Ownership failures read the same as a missing record to the caller.
        if !creation.is_owned_by(user_id) {
            return Err(CreationError::NotFound { id: id.to_string() }.into());
        }

        creation.toggle_published();
        self.creations.update_published(&creation).await?;

        Ok(creation)
    }
}
