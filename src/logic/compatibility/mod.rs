pub mod biological;
pub mod diversity;
pub mod engine;
pub mod pairwise;
pub mod table;

pub use engine::CompatibilityEngine;
pub use table::RuleTable;

use crate::models::{CompatibilityLevel, Product, ProductType};
use indexmap::IndexSet;

/// A single reason a tank mix is not clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub check_id: &'static str,
    pub level: CompatibilityLevel,
    pub message: String,
}

impl Finding {
    pub fn critical(check_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            check_id,
            level: CompatibilityLevel::Critical,
            message: message.into(),
        }
    }

    pub fn advisory(check_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            check_id,
            level: CompatibilityLevel::Advisory,
            message: message.into(),
        }
    }
}

/// Trait for tank-mix checks
pub trait MixCheck: Send + Sync {
    /// Unique identifier for this check
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect the products of one tank mix and report any findings
    fn evaluate(&self, products: &[Product], table: &RuleTable) -> Vec<Finding>;
}

/// Distinct known product types in first-seen order. Untyped products are skipped.
pub fn distinct_types(products: &[Product]) -> IndexSet<ProductType> {
    products.iter().filter_map(|p| p.product_type).collect()
}
