//! Entitlement gate use cases
//!
//! The gate is stateless: every guarded request resolves the entitlement
//! fresh, takes a pure admission decision, and (for admitted free-tier
//! requests) decrements the remaining allowance in the profile store.

use std::sync::Arc;

use crate::domain::entitlement::{
    AdmissionDecision, DenyReason, Entitlement, EntitlementError, IProfileStore, UserId,
};

/// Result of the composite admit-and-charge step for a guarded route.
///
/// `entitlement` is the pre-decrement snapshot observed at admission time;
/// callers echo it back in the response envelope.
#[derive(Debug, Clone, Copy)]
pub struct Admission {
    pub entitlement: Entitlement,
    pub decision: AdmissionDecision,
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        self.decision.is_allowed()
    }
}

/// Entitlement gate over a pluggable profile store.
///
/// Two decrement strategies exist. The default reads the counter at
/// resolution time and writes back `observed - 1` with no compare-and-swap;
/// concurrent requests from the same user can each observe the same counter
/// and all be admitted (last-write-wins in the store). Setting
/// `conditional_decrement` switches admitted free-tier requests to the
/// store's atomic decrement-if-positive, which admits at most `remaining`
/// concurrent requests; this requires a store that supports conditional
/// updates.
pub struct EntitlementGate {
    store: Arc<dyn IProfileStore>,
    default_free_allowance: i64,
    conditional_decrement: bool,
}

impl EntitlementGate {
    /// Create a new gate.
    ///
    /// Downgrades to the plain read-then-write strategy (with a warning) when
    /// conditional decrement is requested but the store cannot provide it.
    pub fn new(
        store: Arc<dyn IProfileStore>,
        default_free_allowance: i64,
        conditional_decrement: bool,
    ) -> Self {
        let conditional_decrement = if conditional_decrement && !store.supports_conditional_decrement()
        {
            tracing::warn!(
                "Conditional decrement requested but the profile store does not support it; \
                 falling back to read-then-write"
            );
            false
        } else {
            conditional_decrement
        };

        Self {
            store,
            default_free_allowance,
            conditional_decrement,
        }
    }

    /// Resolve the current entitlement for a user. No side effects.
    pub async fn resolve(&self, user_id: &str) -> Result<Entitlement, EntitlementError> {
        let user_id = UserId::new(user_id)?;
        let profile = self.store.fetch(&user_id).await?;
        Ok(Entitlement::resolve(&profile, self.default_free_allowance))
    }

    /// Decrement the free-usage counter using the value observed at admission.
    ///
    /// No-op when the observed value is already exhausted; the written value
    /// is floored at zero so the stored counter never goes negative.
    pub async fn consume(
        &self,
        user_id: &UserId,
        observed_free_usage: i64,
    ) -> Result<(), EntitlementError> {
        if observed_free_usage <= 0 {
            return Ok(());
        }

        self.store
            .write_free_usage(user_id, (observed_free_usage - 1).max(0))
            .await
    }

    /// Fail-open variant of [`consume`](Self::consume): a failed decrement is
    /// logged and the guarded action proceeds unbilled.
    pub async fn charge(&self, user_id: &UserId, observed_free_usage: i64) {
        if let Err(e) = self.consume(user_id, observed_free_usage).await {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                "Free-usage decrement failed; continuing without charging"
            );
        }
    }

    /// Composite step used by guarded routes: resolve, admit, and charge
    /// admitted free-tier requests.
    pub async fn admit_and_charge(&self, user_id: &str) -> Result<Admission, EntitlementError> {
        let entitlement = self.resolve(user_id).await?;
        let decision = entitlement.admit();

        if !decision.is_allowed() {
            return Ok(Admission {
                entitlement,
                decision,
            });
        }

        if let Entitlement::Free { remaining } = entitlement {
            let user_id = UserId::new(user_id)?;

            if self.conditional_decrement {
                if self
                    .store
                    .decrement_if_positive(&user_id, self.default_free_allowance)
                    .await?
                    .is_none()
                {
                    // Another request consumed the last unit between the read
                    // and the decrement.
                    return Ok(Admission {
                        entitlement,
                        decision: AdmissionDecision::Deny {
                            reason: DenyReason::QuotaExhausted,
                        },
                    });
                }
            } else {
                self.charge(&user_id, remaining).await;
            }
        }

        Ok(Admission {
            entitlement,
            decision: AdmissionDecision::Allow,
        })
    }
}
