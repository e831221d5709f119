//! Media CDN clients

pub mod cdn_client;

pub use cdn_client::MediaCdnClient;
