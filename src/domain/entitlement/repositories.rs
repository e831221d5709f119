//! Entitlement repository traits

use async_trait::async_trait;

use super::entities::UserProfile;
use super::errors::EntitlementError;
use super::value_objects::UserId;

/// Remote per-user profile store holding plan fields and the free-usage counter.
///
/// `fetch` and `write_free_usage` are the plain read and best-effort write the
/// gate uses by default; the write carries no compare-and-swap, so concurrent
/// writers for the same key follow last-write-wins. Stores backed by a
/// transactional engine can additionally report support for
/// `decrement_if_positive`, which the gate uses when conditional decrement is
/// enabled in configuration.
#[async_trait]
pub trait IProfileStore: Send + Sync {
    /// Fetch the profile for a user.
    async fn fetch(&self, user_id: &UserId) -> Result<UserProfile, EntitlementError>;

    /// Overwrite the stored free-usage counter. Callers pass a non-negative value.
    async fn write_free_usage(
        &self,
        user_id: &UserId,
        remaining: i64,
    ) -> Result<(), EntitlementError>;

    /// Whether this store implements `decrement_if_positive` as a single
    /// conditional update.
    fn supports_conditional_decrement(&self) -> bool {
        false
    }

    /// Atomically decrement the counter when it is positive. An absent
    /// counter counts as `default_allowance`, matching resolution semantics.
    ///
    /// Returns the new counter value, or `None` when the counter was already
    /// exhausted and nothing was written.
    async fn decrement_if_positive(
        &self,
        _user_id: &UserId,
        _default_allowance: i64,
    ) -> Result<Option<i64>, EntitlementError> {
        Err(EntitlementError::ConditionalUpdateUnsupported)
    }
}
