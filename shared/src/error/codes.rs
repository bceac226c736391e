//! Numeric error codes shared by the backend and the admin console
//!
//! The thousands digit selects the domain (see [`super::ErrorCategory`]).
//! Each code carries a default English message used when the backend sends
//! none.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($($name:ident = $value:literal => $message:literal,)+) => {
        /// Wire code of a failed (or successful) operation, serialized as u16
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $(
                #[doc = $message]
                $name = $value,
            )+
        }

        impl ErrorCode {
            /// Default message for this code
            pub const fn message(&self) -> &'static str {
                match self {
                    $(Self::$name => $message,)+
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$name),)+
                    other => Err(InvalidErrorCode(other)),
                }
            }
        }
    };
}

error_codes! {
    Success = 0 => "Operation completed successfully",
    Unknown = 1 => "An unknown error occurred",
    ValidationFailed = 2 => "Validation failed",
    NotFound = 3 => "Resource not found",
    AlreadyExists = 4 => "Resource already exists",
    InvalidRequest = 5 => "Invalid request",
    InvalidFormat = 6 => "Invalid format",
    RequiredField = 7 => "Required field is missing",
    ValueOutOfRange = 8 => "Value is out of range",

    NotAuthenticated = 1001 => "User is not authenticated",
    TokenExpired = 1003 => "Token has expired",
    TokenInvalid = 1004 => "Token is invalid",
    SessionExpired = 1005 => "Session has expired",

    PermissionDenied = 2001 => "Permission denied",
    AdminRequired = 2003 => "Admin role required",

    BranchNotFound = 3001 => "Branch not found",
    BranchNameExists = 3002 => "Branch name already exists",
    MainStoreProtected = 3003 => "Main Store cannot be deleted or renamed",
    BranchNotSelected = 3004 => "No branch selected",

    EmployeeNotFound = 4001 => "Employee not found",
    EmployeeUsernameExists = 4002 => "Username already exists",
    RoleNotFound = 4003 => "Role not found",
    RoleInUse = 4004 => "Role is assigned to employees",
    LoginStatusNotFound = 4005 => "Login status not found",

    ProductNotFound = 5001 => "Product not found",
    PriceTypeNotFound = 5002 => "Price type not found",
    PriceTypeInUse = 5003 => "Price type is in use",
    InvalidPrice = 5004 => "Invalid price",
    EmptyPriceUpdate = 5005 => "No prices to update",
    InvalidAlertQuantity = 5006 => "Invalid alert quantity",

    SettingsNotFound = 6001 => "Company settings not found",
    CompanyNameRequired = 6002 => "Company name is required",

    InternalError = 9001 => "Internal server error",
    DatabaseError = 9002 => "Database error",
    NetworkError = 9003 => "Network error",
    TimeoutError = 9004 => "Request timed out",
    ConfigError = 9005 => "Configuration error",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A u16 with no matching [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);
