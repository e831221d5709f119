//! Profile store backends

pub mod http_store;
pub mod memory_store;
pub mod sqlx_store;

pub use http_store::HttpProfileStore;
pub use memory_store::InMemoryProfileStore;
pub use sqlx_store::SqlxProfileStore;
