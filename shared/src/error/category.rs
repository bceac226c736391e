//! Domain of an error code

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain selected by the thousands digit of an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Branch,
    Employee,
    Pricing,
    Settings,
    /// 7xxx and up
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Branch,
            4 => Self::Employee,
            5 => Self::Pricing,
            6 => Self::Settings,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
