//! Quillgen - AI content studio API
//!
//! Authenticated HTTP routes wrapping external AI generation backends behind
//! a free/premium entitlement gate, with generated artifacts persisted for
//! listing and community publishing.

mod app;

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::{create_app, AppHandle};
pub use config::Config;
pub use logging::init_tracing;
