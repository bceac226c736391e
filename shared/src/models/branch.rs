//! Branch Model

use serde::{Deserialize, Serialize};

/// Name of the distinguished branch that cannot be deleted or renamed
pub const MAIN_STORE_NAME: &str = "Main Store";

/// Branch entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Branch {
    /// Whether this is the protected Main Store
    pub fn is_main_store(&self) -> bool {
        self.name == MAIN_STORE_NAME
    }
}

fn default_true() -> bool {
    true
}

/// Create branch payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub manager: Option<String>,
    pub is_active: Option<bool>,
}

/// Update branch payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
