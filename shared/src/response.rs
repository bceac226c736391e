//! Response body shapes accepted from the backend
//!
//! List and detail endpoints answer either with the bare value or with the
//! value wrapped as `{ "data": ... }`. Error bodies carry a `message` and an
//! optional numeric `code`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ErrorCode;

/// Success body, bare or enveloped
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    /// `{ "data": ... }`
    Enveloped { data: T },
    /// The value itself
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwrap the carried value regardless of shape
    pub fn into_inner(self) -> T {
        match self {
            Payload::Enveloped { data } => data,
            Payload::Bare(data) => data,
        }
    }
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ErrorBody {
    /// Known error code, if the server sent one we understand
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code.and_then(|c| ErrorCode::try_from(c).ok())
    }
}
