//! Price Type Model

use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Named pricing tier (retail, wholesale, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

/// Create price type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTypeCreate {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
}

/// Update price type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}
