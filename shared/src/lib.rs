//! Shared types for the POS admin console
//!
//! Wire models, error codes and response envelopes used by both the
//! REST client and the console.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use response::{ErrorBody, Payload};
pub use serde::{Deserialize, Serialize};
