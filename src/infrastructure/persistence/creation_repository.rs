//! Creation repository implementations

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;
use tracing::error;
use uuid::Uuid;

use crate::domain::creation::{
    Creation, CreationError, CreationId, CreationKind, ICreationRepository,
};
use crate::domain::entitlement::UserId;

/// SQLx implementation of the creation repository
pub struct SqlxCreationRepository {
    pool: Arc<PgPool>,
}

impl SqlxCreationRepository {
    /// Create a new SQLx creation repository
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn map_db_error(context: &str, e: sqlx::Error) -> CreationError {
        error!("Database error {}: {}", context, e);
        CreationError::database(e.to_string())
    }

    fn map_row(row: &PgRow) -> Result<Creation, CreationError> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let prompt: String = row
            .try_get("prompt")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let content: String = row
            .try_get("content")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let kind: String = row
            .try_get("kind")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let published: bool = row
            .try_get("published")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| Self::map_db_error("reading creation row", e))?;

        Ok(Creation {
            id: CreationId::from(id),
            user_id: UserId::new(user_id).map_err(|e| CreationError::database(e.to_string()))?,
            prompt,
            content,
            kind: CreationKind::from_str(&kind).map_err(CreationError::database)?,
            published,
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl ICreationRepository for SqlxCreationRepository {
    async fn create(&self, creation: &Creation) -> Result<(), CreationError> {
        sqlx::query(
            r#"
            INSERT INTO creations (id, user_id, prompt, content, kind, published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(creation.id.as_uuid())
        .bind(creation.user_id.as_str())
        .bind(&creation.prompt)
        .bind(&creation.content)
        .bind(creation.kind.as_str())
        .bind(creation.published)
        .bind(creation.created_at)
        .bind(creation.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("creating creation", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CreationId) -> Result<Option<Creation>, CreationError> {
        let row = sqlx::query(
            "SELECT id, user_id, prompt, content, kind, published, created_at, updated_at \
             FROM creations WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("finding creation by id", e))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Creation>, CreationError> {
        let rows = sqlx::query(
            "SELECT id, user_id, prompt, content, kind, published, created_at, updated_at \
             FROM creations WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id.as_str())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("finding creations by user", e))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn find_published(&self) -> Result<Vec<Creation>, CreationError> {
        let rows = sqlx::query(
            "SELECT id, user_id, prompt, content, kind, published, created_at, updated_at \
             FROM creations WHERE published ORDER BY created_at DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("finding published creations", e))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update_published(&self, creation: &Creation) -> Result<(), CreationError> {
        let result = sqlx::query(
            "UPDATE creations SET published = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(creation.id.as_uuid())
        .bind(creation.published)
        .bind(creation.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("updating publish flag", e))?;

        if result.rows_affected() == 0 {
            return Err(CreationError::NotFound {
                id: creation.id.to_string(),
            });
        }

        Ok(())
    }
}

/// In-memory creation repository for tests and local development
pub struct InMemoryCreationRepository {
    creations: RwLock<HashMap<Uuid, Creation>>,
}

impl InMemoryCreationRepository {
    pub fn new() -> Self {
        Self {
            creations: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCreationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ICreationRepository for InMemoryCreationRepository {
    async fn create(&self, creation: &Creation) -> Result<(), CreationError> {
        let mut creations = self.creations.write().await;
        creations.insert(creation.id.as_uuid(), creation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CreationId) -> Result<Option<Creation>, CreationError> {
        let creations = self.creations.read().await;
        Ok(creations.get(&id.as_uuid()).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Creation>, CreationError> {
        let creations = self.creations.read().await;
        let mut found: Vec<Creation> = creations
            .values()
            .filter(|c| c.is_owned_by(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_published(&self) -> Result<Vec<Creation>, CreationError> {
        let creations = self.creations.read().await;
        let mut found: Vec<Creation> = creations
            .values()
            .filter(|c| c.published)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update_published(&self, creation: &Creation) -> Result<(), CreationError> {
        let mut creations = self.creations.write().await;
        match creations.get_mut(&creation.id.as_uuid()) {
            Some(stored) => {
                stored.published = creation.published;
                stored.updated_at = creation.updated_at;
                Ok(())
            }
            None => Err(CreationError::NotFound {
                id: creation.id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creation::CreationKind;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[tokio::test]
    async fn lists_own_creations_newest_first() {
        let repo = InMemoryCreationRepository::new();

        let mut older = Creation::new(
            uid("user_a"),
            "first".into(),
            "text".into(),
            CreationKind::Article,
        );
        older.created_at = Utc::now() - chrono::Duration::minutes(5);
        let newer = Creation::new(
            uid("user_a"),
            "second".into(),
            "text".into(),
            CreationKind::Article,
        );
        let other = Creation::new(
            uid("user_b"),
            "third".into(),
            "text".into(),
            CreationKind::Article,
        );

        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();
        repo.create(&other).await.unwrap();

        let found = repo.find_by_user(&uid("user_a")).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].prompt, "second");
        assert_eq!(found[1].prompt, "first");
    }

    #[tokio::test]
    async fn published_listing_only_shows_published() {
        let repo = InMemoryCreationRepository::new();

        let mut published = Creation::new(
            uid("user_a"),
            "shared".into(),
            "text".into(),
            CreationKind::Image,
        );
        published.toggle_published();
        let private = Creation::new(
            uid("user_a"),
            "private".into(),
            "text".into(),
            CreationKind::Image,
        );

        repo.create(&published).await.unwrap();
        repo.create(&private).await.unwrap();

        let found = repo.find_published().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].prompt, "shared");
    }

    #[tokio::test]
    async fn update_published_requires_existing_record() {
        let repo = InMemoryCreationRepository::new();
        let creation = Creation::new(
            uid("user_a"),
            "missing".into(),
            "text".into(),
            CreationKind::Article,
        );

        assert!(matches!(
            repo.update_published(&creation).await.unwrap_err(),
            CreationError::NotFound { .. }
        ));
    }
}
