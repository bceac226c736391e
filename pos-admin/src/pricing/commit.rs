//! Bulk price commit
//!
//! All pending prices of a dialog go to the backend in a single
//! `POST /update-product-price`; the batch succeeds or fails as a whole.

use pos_client::{HttpClient, PosApi};
use shared::models::PriceUpdate;

use super::buffer::PriceEditBuffer;
use crate::error::{AdminError, AdminResult};

/// Shown when a failed commit carries no server message
pub const COMMIT_FALLBACK_MESSAGE: &str = "Failed to update prices";

/// Shown when a successful commit carries no server message
pub const COMMIT_SUCCESS_MESSAGE: &str = "Prices updated successfully";

/// Validated batch ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct BulkCommit {
    prices: Vec<PriceUpdate>,
}

impl BulkCommit {
    /// Convert the buffer into a batch
    ///
    /// The buffer is only read; it stays intact whatever happens next.
    pub fn prepare(buffer: &PriceEditBuffer) -> AdminResult<Self> {
        let prices = buffer.to_update_list()?;
        if prices.is_empty() {
            return Err(AdminError::EmptyCommit);
        }
        Ok(Self { prices })
    }

    pub fn prices(&self) -> &[PriceUpdate] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Issue the single batched request
    ///
    /// Returns the server's confirmation message, if it sent one.
    pub async fn submit<C: HttpClient>(self, api: &PosApi<C>) -> AdminResult<Option<String>> {
        let count = self.prices.len();
        let resource = match self.prices.first() {
            Some(p) => format!("prices:product:{}:branch:{}", p.product_id, p.branch_id),
            None => "prices".to_string(),
        };
        tracing::info!(count, %resource, "Submitting bulk price update");
        let message = api.update_product_prices(self.prices).await?;
        crate::audit_log!("update", resource, format!("{} prices", count));
        Ok(message)
    }
}
