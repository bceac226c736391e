//! Error codes, the coded [`AppError`] and the [`ApiResponse`] envelope
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::InvalidPrice, "Price must be a number")
//!     .with_detail("key", "5-2-9");
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(5004));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
