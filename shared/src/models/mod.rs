//! Data models
//!
//! Wire shapes of the REST backend. All IDs are `i64`.

pub mod branch;
pub mod employee;
pub mod login_status;
pub mod price;
pub mod price_type;
pub mod product;
pub mod role;
pub mod settings;

// Re-exports
pub use branch::*;
pub use employee::*;
pub use login_status::*;
pub use price::*;
pub use price_type::*;
pub use product::*;
pub use role::*;
pub use settings::*;

use serde::{Deserialize, Serialize};

/// Active/Inactive flag used by products, price types and login statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}
