//! Branch Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Product as listed for one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchProduct {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Stock on hand (decimal, units may be fractional)
    #[serde(default)]
    pub stock_quantity: Decimal,
    /// Threshold below which the product is flagged as low stock
    #[serde(default)]
    pub alert_quantity: i64,
    #[serde(default)]
    pub status: RecordStatus,
}

impl BranchProduct {
    /// Stock is at or below the alert threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= Decimal::from(self.alert_quantity)
    }
}

/// Alert quantity edit payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlertQuantityUpdate {
    pub alert_quantity: i64,
}
