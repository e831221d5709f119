//! Entitlement domain: plans, free-usage allowance, admission decisions

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::{AdmissionDecision, DenyReason, Entitlement, UserProfile};
pub use errors::EntitlementError;
pub use repositories::IProfileStore;
pub use value_objects::{Plan, UserId};
