//! POS Client - REST client for the POS backend
//!
//! Provides authenticated HTTP calls to the backend resources used by the
//! admin console. The bearer token is carried by an explicit [`Session`]
//! injected at construction time.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod resource;
pub mod session;

pub use api::PosApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use resource::Resource;
pub use session::{Session, SessionStorage, TokenClaims};

// Re-export shared types for convenience
pub use shared::models;
