//! Price edit buffer
//!
//! Pending price edits for one product, keyed by [`PriceKey`] and held as
//! the raw text the user typed until commit.

use rust_decimal::Decimal;
use shared::models::{PriceType, PriceUpdate, ProductPrice};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::key::{KeyParseError, PriceKey};
use crate::error::{AdminError, AdminResult};

/// Value seeded for price cells that have no row on the server
pub const DEFAULT_PRICE: &str = "0";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceEditBuffer {
    entries: BTreeMap<PriceKey, String>,
}

impl PriceEditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at the cell, replacing any previous value
    pub fn set(
        &mut self,
        product_id: i64,
        branch_id: i64,
        price_type_id: i64,
        value: impl Into<String>,
    ) {
        self.set_key(PriceKey::new(product_id, branch_id, price_type_id), value);
    }

    pub fn set_key(&mut self, key: PriceKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    /// Store a value under a textual `"{product}-{branch}-{price_type}"` key
    pub fn set_raw(&mut self, key: &str, value: impl Into<String>) -> Result<(), KeyParseError> {
        let key = key.parse()?;
        self.set_key(key, value);
        Ok(())
    }

    /// Reset to one entry per price type for (product, branch)
    ///
    /// Existing rows for the same cell supply the value; cells without a
    /// row get [`DEFAULT_PRICE`]. Rows for other products or branches are
    /// ignored.
    pub fn seed(
        &mut self,
        product_id: i64,
        branch_id: i64,
        price_types: &[PriceType],
        existing: &[ProductPrice],
    ) {
        self.entries.clear();
        for price_type in price_types {
            let value = existing
                .iter()
                .find(|p| {
                    p.product_id == product_id
                        && p.branch_id == branch_id
                        && p.price_type_id == price_type.id
                })
                .map(|p| p.price.to_string())
                .unwrap_or_else(|| DEFAULT_PRICE.to_string());
            self.set(product_id, branch_id, price_type.id, value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &PriceKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PriceKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Copy of the pending values under their textual keys
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Update records in key order
    ///
    /// Fails on the first value that is not a non-negative decimal, naming
    /// its key; nothing is coerced.
    pub fn to_update_list(&self) -> AdminResult<Vec<PriceUpdate>> {
        self.entries
            .iter()
            .map(|(key, value)| {
                Ok(PriceUpdate {
                    product_id: key.product_id,
                    branch_id: key.branch_id,
                    price_type_id: key.price_type_id,
                    price: parse_price(key, value)?,
                })
            })
            .collect()
    }
}

fn parse_price(key: &PriceKey, value: &str) -> AdminResult<Decimal> {
    let invalid = || AdminError::InvalidPrice {
        key: *key,
        value: value.to_string(),
    };
    let price = Decimal::from_str(value.trim()).map_err(|_| invalid())?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid());
    }
    Ok(price)
}
