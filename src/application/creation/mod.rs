//! Creation application services

pub mod use_cases;

pub use use_cases::{ListCommunityUseCase, ListCreationsUseCase, TogglePublishUseCase};
