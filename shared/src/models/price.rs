//! Product Price Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Existing price row for (product, branch, price type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: i64,
    pub branch_id: i64,
    pub price_type_id: i64,
    pub price: Decimal,
}

/// One record of a bulk price update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub product_id: i64,
    pub branch_id: i64,
    pub price_type_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Body of `POST /update-product-price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdateRequest {
    pub prices: Vec<PriceUpdate>,
}
