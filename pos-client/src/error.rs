//! Client error types

use serde_json::Value;
use shared::ErrorCode;
use std::collections::HashMap;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Business error reported by the server in the response body
    #[error("API error: {message}")]
    Api {
        code: Option<ErrorCode>,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Message the server put in the error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Best matching error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::Api { code, .. } => code.unwrap_or(ErrorCode::Unknown),
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Config(_) => ErrorCode::ConfigError,
            ClientError::InvalidResponse(_)
            | ClientError::Serialization(_)
            | ClientError::Io(_)
            | ClientError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
