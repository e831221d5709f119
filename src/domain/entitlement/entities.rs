//! Entitlement domain entities

use super::value_objects::Plan;

/// Raw per-user profile fields as held by the external store.
///
/// The plan may be recorded in a public field, a private field, both, or
/// neither; the usage counter may be absent entirely. `resolve` collapses
/// these into an [`Entitlement`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub public_plan: Option<Plan>,
    pub private_plan: Option<Plan>,
    pub free_usage: Option<i64>,
}

/// Resolved entitlement for a user at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    /// Premium users are always admitted; the usage counter is not meaningful.
    Premium,
    /// Free users are admitted while `remaining` is positive.
    Free { remaining: i64 },
}

impl Entitlement {
    /// Collapse raw profile fields into an entitlement.
    ///
    /// Premium wins if either the public or the private plan field carries it.
    /// Otherwise the user is on the free tier with the recorded counter, or
    /// `default_allowance` when the counter is absent.
    pub fn resolve(profile: &UserProfile, default_allowance: i64) -> Self {
        let premium = profile.public_plan == Some(Plan::Premium)
            || profile.private_plan == Some(Plan::Premium);

        if premium {
            Entitlement::Premium
        } else {
            Entitlement::Free {
                remaining: profile.free_usage.unwrap_or(default_allowance),
            }
        }
    }

    pub fn plan(&self) -> Plan {
        match self {
            Entitlement::Premium => Plan::Premium,
            Entitlement::Free { .. } => Plan::Free,
        }
    }

    /// Remaining free allowance; zero for premium users, where it carries no meaning.
    pub fn free_usage(&self) -> i64 {
        match self {
            Entitlement::Premium => 0,
            Entitlement::Free { remaining } => *remaining,
        }
    }

    /// Admission decision. Pure, no I/O.
    pub fn admit(&self) -> AdmissionDecision {
        match self {
            Entitlement::Premium => AdmissionDecision::Allow,
            Entitlement::Free { remaining } if *remaining > 0 => AdmissionDecision::Allow,
            Entitlement::Free { .. } => AdmissionDecision::Deny {
                reason: DenyReason::QuotaExhausted,
            },
        }
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    Allow,
    Deny { reason: DenyReason },
}

impl AdmissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmissionDecision::Allow)
    }
}

/// Reason a request was denied admission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    QuotaExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_always_admits() {
        let entitlement = Entitlement::Premium;
        assert!(entitlement.admit().is_allowed());
        assert_eq!(entitlement.free_usage(), 0);
    }

    #[test]
    fn free_with_positive_remaining_admits() {
        let entitlement = Entitlement::Free { remaining: 1 };
        assert!(entitlement.admit().is_allowed());
    }

    #[test]
    fn free_with_zero_or_negative_remaining_denies() {
        for remaining in [0, -1, -37] {
            let entitlement = Entitlement::Free { remaining };
            assert_eq!(
                entitlement.admit(),
                AdmissionDecision::Deny {
                    reason: DenyReason::QuotaExhausted
                }
            );
        }
    }

    #[test]
    fn premium_in_either_plan_field_wins() {
        let profile = UserProfile {
            public_plan: Some(Plan::Free),
            private_plan: Some(Plan::Premium),
            free_usage: Some(3),
        };
        let entitlement = Entitlement::resolve(&profile, 10);
        assert_eq!(entitlement, Entitlement::Premium);

        let profile = UserProfile {
            public_plan: Some(Plan::Premium),
            private_plan: None,
            free_usage: None,
        };
        assert_eq!(Entitlement::resolve(&profile, 10), Entitlement::Premium);
    }

    #[test]
    fn absent_counter_uses_default_allowance() {
        let profile = UserProfile {
            public_plan: None,
            private_plan: Some(Plan::Free),
            free_usage: None,
        };
        assert_eq!(
            Entitlement::resolve(&profile, 10),
            Entitlement::Free { remaining: 10 }
        );
    }

    #[test]
    fn recorded_counter_is_preserved() {
        let profile = UserProfile {
            public_plan: None,
            private_plan: None,
            free_usage: Some(4),
        };
        assert_eq!(
            Entitlement::resolve(&profile, 10),
            Entitlement::Free { remaining: 4 }
        );
    }
}
