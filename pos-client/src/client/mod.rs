//! HTTP transports
//!
//! [`HttpClient`] is the seam every API call goes through. The network
//! implementation talks to the backend over `reqwest`; the in-process one
//! (feature `in-process`) drives an axum `Router` directly.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;

use shared::ErrorBody;

use crate::error::{ClientError, ClientResult};

/// Map a non-2xx status and its body text to a client error
pub(crate) fn error_from_status(status: ::http::StatusCode, text: String) -> ClientError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        return ClientError::Api {
            code: body.error_code(),
            message: body.message,
            details: body.details,
        };
    }
    match status {
        ::http::StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
        ::http::StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        ::http::StatusCode::NOT_FOUND => ClientError::NotFound(text),
        ::http::StatusCode::BAD_REQUEST | ::http::StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(text)
        }
        _ => ClientError::Internal(text),
    }
}

/// Decode a success body; an empty body (e.g. 204) reads as JSON `null`
pub(crate) fn decode_success<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
