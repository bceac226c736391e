//! Composite price key

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// (product, branch, price type) identifying one price cell
///
/// Ordered by product, then branch, then price type. The textual form
/// `"{product}-{branch}-{price_type}"` is only used for display and for
/// reading keys back; ids are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PriceKey {
    pub product_id: i64,
    pub branch_id: i64,
    pub price_type_id: i64,
}

impl PriceKey {
    pub const SEPARATOR: char = '-';

    pub fn new(product_id: i64, branch_id: i64, price_type_id: i64) -> Self {
        Self {
            product_id,
            branch_id,
            price_type_id,
        }
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.product_id,
            self.branch_id,
            self.price_type_id,
            sep = Self::SEPARATOR
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price key '{0}': expected <product>-<branch>-<price_type> with non-negative ids")]
pub struct KeyParseError(pub String);

impl FromStr for PriceKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || KeyParseError(s.to_string());
        let parts: Vec<&str> = s.split(Self::SEPARATOR).collect();
        // a negative id leaves an empty segment, so it lands here too
        if parts.len() != 3 {
            return Err(err());
        }
        let mut ids = [0i64; 3];
        for (slot, part) in ids.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            *slot = part.parse().map_err(|_| err())?;
        }
        Ok(Self::new(ids[0], ids[1], ids[2]))
    }
}
