//! Presentation Layer - HTTP API

pub mod controllers;
pub mod extractors;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use controllers::AppState;
pub use routes::create_router;
