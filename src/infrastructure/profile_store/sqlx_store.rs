//! SQLx implementation of the profile store
//!
//! Backs the gate with a local `user_profiles` table. Unlike the metadata
//! store the database supports a single-statement conditional update, so
//! this backend can serve the conditional decrement strategy. Profiles are
//! auto-provisioned on first read with unset fields.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::error;

use crate::domain::entitlement::{EntitlementError, IProfileStore, UserId, UserProfile};

/// SQLx implementation of the profile store
pub struct SqlxProfileStore {
    pool: Arc<PgPool>,
}

impl SqlxProfileStore {
    /// Create a new SQLx profile store
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn map_db_error(context: &str, e: sqlx::Error) -> EntitlementError {
        error!("Database error {}: {}", context, e);
        EntitlementError::unavailable(e.to_string())
    }
}

#[async_trait]
impl IProfileStore for SqlxProfileStore {
    async fn fetch(&self, user_id: &UserId) -> Result<UserProfile, EntitlementError> {
        sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| Self::map_db_error("provisioning profile", e))?;

        let row = sqlx::query(
            "SELECT public_plan, private_plan, free_usage FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("fetching profile", e))?
        .ok_or_else(|| EntitlementError::UnknownUser {
            user_id: user_id.to_string(),
        })?;

        let public_plan: Option<String> = row
            .try_get("public_plan")
            .map_err(|e| Self::map_db_error("reading profile row", e))?;
        let private_plan: Option<String> = row
            .try_get("private_plan")
            .map_err(|e| Self::map_db_error("reading profile row", e))?;
        let free_usage: Option<i64> = row
            .try_get("free_usage")
            .map_err(|e| Self::map_db_error("reading profile row", e))?;

        Ok(UserProfile {
            public_plan: public_plan.as_deref().and_then(|p| p.parse().ok()),
            private_plan: private_plan.as_deref().and_then(|p| p.parse().ok()),
            free_usage,
        })
    }

    async fn write_free_usage(
        &self,
        user_id: &UserId,
        remaining: i64,
    ) -> Result<(), EntitlementError> {
        let result = sqlx::query(
            "UPDATE user_profiles SET free_usage = $2, updated_at = now() WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .bind(remaining)
        .execute(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("writing free usage", e))?;

        if result.rows_affected() == 0 {
            return Err(EntitlementError::UnknownUser {
                user_id: user_id.to_string(),
            });
        }

        Ok(())
    }

    fn supports_conditional_decrement(&self) -> bool {
        true
    }

    async fn decrement_if_positive(
        &self,
        user_id: &UserId,
        default_allowance: i64,
    ) -> Result<Option<i64>, EntitlementError> {
        let row = sqlx::query(
            r#"
            UPDATE user_profiles
            SET free_usage = COALESCE(free_usage, $2) - 1, updated_at = now()
            WHERE user_id = $1 AND COALESCE(free_usage, $2) > 0
            RETURNING free_usage
            "#,
        )
        .bind(user_id.as_str())
        .bind(default_allowance)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Self::map_db_error("decrementing free usage", e))?;

        match row {
            Some(row) => {
                let remaining: Option<i64> = row
                    .try_get("free_usage")
                    .map_err(|e| Self::map_db_error("reading decrement result", e))?;
                Ok(remaining)
            }
            None => Ok(None),
        }
    }
}
