//! In-memory profile store for tests and local development

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entitlement::{EntitlementError, IProfileStore, Plan, UserId, UserProfile};

/// In-memory profile store.
///
/// Auto-provisions an empty profile on first read (like most hosted metadata
/// stores) unless constructed with strict lookups. Supports conditional
/// decrement under a single lock.
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
    strict_lookups: bool,
    conditional_decrement: bool,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            strict_lookups: false,
            conditional_decrement: true,
        }
    }

    /// Fail reads for users that were never written instead of provisioning
    /// an empty profile.
    pub fn with_strict_lookups() -> Self {
        Self {
            strict_lookups: true,
            ..Self::new()
        }
    }

    /// Report no conditional-decrement support, mimicking stores that only
    /// offer a plain read and a best-effort write.
    pub fn without_conditional_decrement(mut self) -> Self {
        self.conditional_decrement = false;
        self
    }

    pub async fn set_public_plan(&self, user_id: &UserId, plan: Plan) {
        let mut profiles = self.profiles.write().await;
        profiles.entry(user_id.as_str().to_string()).or_default().public_plan = Some(plan);
    }

    pub async fn set_private_plan(&self, user_id: &UserId, plan: Plan) {
        let mut profiles = self.profiles.write().await;
        profiles.entry(user_id.as_str().to_string()).or_default().private_plan = Some(plan);
    }

    pub async fn set_free_usage(&self, user_id: &UserId, remaining: i64) {
        let mut profiles = self.profiles.write().await;
        profiles.entry(user_id.as_str().to_string()).or_default().free_usage = Some(remaining);
    }

    /// Currently stored counter, if any
    pub async fn free_usage(&self, user_id: &UserId) -> Option<i64> {
        let profiles = self.profiles.read().await;
        profiles.get(user_id.as_str()).and_then(|p| p.free_usage)
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IProfileStore for InMemoryProfileStore {
    async fn fetch(&self, user_id: &UserId) -> Result<UserProfile, EntitlementError> {
        let mut profiles = self.profiles.write().await;

        if self.strict_lookups {
            return profiles
                .get(user_id.as_str())
                .cloned()
                .ok_or_else(|| EntitlementError::UnknownUser {
                    user_id: user_id.to_string(),
                });
        }

        Ok(profiles
            .entry(user_id.as_str().to_string())
            .or_default()
            .clone())
    }

    async fn write_free_usage(
        &self,
        user_id: &UserId,
        remaining: i64,
    ) -> Result<(), EntitlementError> {
        let mut profiles = self.profiles.write().await;

        if self.strict_lookups && !profiles.contains_key(user_id.as_str()) {
            return Err(EntitlementError::UnknownUser {
                user_id: user_id.to_string(),
            });
        }

        profiles.entry(user_id.as_str().to_string()).or_default().free_usage = Some(remaining);
        Ok(())
    }

    fn supports_conditional_decrement(&self) -> bool {
        self.conditional_decrement
    }

    async fn decrement_if_positive(
        &self,
        user_id: &UserId,
        default_allowance: i64,
    ) -> Result<Option<i64>, EntitlementError> {
        if !self.conditional_decrement {
            return Err(EntitlementError::ConditionalUpdateUnsupported);
        }

        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(user_id.as_str().to_string()).or_default();

        let remaining = profile.free_usage.unwrap_or(default_allowance);
        if remaining <= 0 {
            return Ok(None);
        }

        profile.free_usage = Some(remaining - 1);
        Ok(Some(remaining - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[tokio::test]
    async fn fetch_provisions_an_empty_profile() {
        let store = InMemoryProfileStore::new();
        let profile = store.fetch(&uid("user_a")).await.unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[tokio::test]
    async fn strict_lookups_fail_for_unknown_users() {
        let store = InMemoryProfileStore::with_strict_lookups();
        assert!(matches!(
            store.fetch(&uid("ghost")).await.unwrap_err(),
            EntitlementError::UnknownUser { .. }
        ));
    }

    #[tokio::test]
    async fn conditional_decrement_applies_default_to_absent_counter() {
        let store = InMemoryProfileStore::new();
        let new = store
            .decrement_if_positive(&uid("user_a"), 10)
            .await
            .unwrap();
        assert_eq!(new, Some(9));
    }

    #[tokio::test]
    async fn conditional_decrement_refuses_exhausted_counter() {
        let store = InMemoryProfileStore::new();
        store.set_free_usage(&uid("user_a"), 0).await;
        let new = store
            .decrement_if_positive(&uid("user_a"), 10)
            .await
            .unwrap();
        assert_eq!(new, None);
        assert_eq!(store.free_usage(&uid("user_a")).await, Some(0));
    }
}
