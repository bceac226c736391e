//! Console error types

use pos_client::ClientError;
use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::pricing::key::{KeyParseError, PriceKey};

/// Console error type
///
/// Covers the three failure classes met at an operation boundary:
/// transport, server-reported business errors (both via [`ClientError`])
/// and client-side validation.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Transport or server-reported failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Pending price is not a non-negative decimal
    #[error("Invalid price '{value}' for {key}")]
    InvalidPrice { key: PriceKey, value: String },

    /// Malformed textual price key
    #[error(transparent)]
    InvalidKey(#[from] KeyParseError),

    /// Nothing to commit
    #[error("No prices to update")]
    EmptyCommit,

    /// Rejected by a client-side rule (required field, Main Store, ...)
    #[error("{0}")]
    Rejected(#[from] AppError),

    /// No branch resolved for the requested filter
    #[error("No branch selected")]
    NoBranchSelected,

    #[error("{0} not found")]
    NotFound(String),

    /// Operation not allowed in the current dialog state
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdminError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AdminError::Client(e) => e.error_code(),
            AdminError::InvalidPrice { .. } | AdminError::InvalidKey(_) => ErrorCode::InvalidPrice,
            AdminError::EmptyCommit => ErrorCode::EmptyPriceUpdate,
            AdminError::Rejected(e) => e.code,
            AdminError::NoBranchSelected => ErrorCode::BranchNotSelected,
            AdminError::NotFound(_) => ErrorCode::NotFound,
            AdminError::InvalidState(_) => ErrorCode::InvalidRequest,
            AdminError::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Text shown to the user
    ///
    /// Remote failures show the server's message when it sent one, else
    /// `fallback`; local failures describe themselves.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AdminError::Client(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            other => other.to_string(),
        }
    }
}

/// Result type for console operations
pub type AdminResult<T> = Result<T, AdminError>;
