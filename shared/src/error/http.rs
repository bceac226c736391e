//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::BranchNotFound
            | Self::EmployeeNotFound
            | Self::RoleNotFound
            | Self::LoginStatusNotFound
            | Self::ProductNotFound
            | Self::PriceTypeNotFound
            | Self::SettingsNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::BranchNameExists
            | Self::EmployeeUsernameExists
            | Self::RoleInUse
            | Self::PriceTypeInUse => StatusCode::CONFLICT,

            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SessionExpired => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied | Self::AdminRequired | Self::MainStoreProtected => {
                StatusCode::FORBIDDEN
            }

            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // validation and business errors
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
