//! Login Status Model

use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Login status entity (e.g. "Allowed", "Suspended")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginStatus {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

/// Create login status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginStatusCreate {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
}

/// Update login status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginStatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}
