//! Branch, price type and product lookups
//!
//! The three lists are fetched independently and only cross-referenced
//! here. Branch resolution fails closed: no match means no branch, and no
//! price lookup may proceed without one.

use shared::models::{Branch, BranchProduct, PriceType};

use crate::error::{AdminError, AdminResult};

/// How the pricing page picks its branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchFilter {
    /// All-branches page: the user picks a branch by name
    ByName(String),
    /// Own-branch page: the branch id comes from the user's employee record
    ById(i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum BranchSelection {
    #[default]
    None,
    Selected(Branch),
}

impl BranchSelection {
    pub fn branch(&self) -> Option<&Branch> {
        match self {
            BranchSelection::Selected(b) => Some(b),
            BranchSelection::None => None,
        }
    }

    /// Id of the selected branch, or [`AdminError::NoBranchSelected`]
    pub fn branch_id(&self) -> AdminResult<i64> {
        self.branch()
            .map(|b| b.id)
            .ok_or(AdminError::NoBranchSelected)
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, BranchSelection::Selected(_))
    }
}

/// Resolve a filter against the loaded branch list
pub fn resolve_branch(branches: &[Branch], filter: &BranchFilter) -> BranchSelection {
    let found = match filter {
        BranchFilter::ByName(name) => branch_id_by_name(branches, name)
            .and_then(|id| branches.iter().find(|b| b.id == id)),
        BranchFilter::ById(id) => branches.iter().find(|b| b.id == *id),
    };
    match found {
        Some(branch) => BranchSelection::Selected(branch.clone()),
        None => BranchSelection::None,
    }
}

/// Exact match on the trimmed name; a blank name matches nothing
pub fn branch_id_by_name(branches: &[Branch], name: &str) -> Option<i64> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    branches.iter().find(|b| b.name.trim() == name).map(|b| b.id)
}

pub fn branch_name_by_id(branches: &[Branch], id: i64) -> Option<&str> {
    branches
        .iter()
        .find(|b| b.id == id)
        .map(|b| b.name.as_str())
}

/// Price type by numeric id, else by case-insensitive name
pub fn resolve_price_type<'a>(price_types: &'a [PriceType], needle: &str) -> Option<&'a PriceType> {
    let needle = needle.trim();
    if let Ok(id) = needle.parse::<i64>() {
        if let Some(found) = price_types.iter().find(|t| t.id == id) {
            return Some(found);
        }
    }
    price_types
        .iter()
        .find(|t| t.name.trim().eq_ignore_ascii_case(needle))
}

pub fn find_product(products: &[BranchProduct], product_id: i64) -> Option<&BranchProduct> {
    products.iter().find(|p| p.id == product_id)
}
