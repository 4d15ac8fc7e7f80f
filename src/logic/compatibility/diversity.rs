use super::{distinct_types, Finding, MixCheck, RuleTable};
use crate::models::Product;

pub const DEFAULT_MAX_DISTINCT_TYPES: usize = 3;

/// Too many different product types in one tank tends to destabilize the mix.
pub struct TypeDiversityCheck {
    max_distinct_types: usize,
}

impl TypeDiversityCheck {
    pub fn new(max_distinct_types: usize) -> Self {
        Self { max_distinct_types }
    }
}

impl Default for TypeDiversityCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTINCT_TYPES)
    }
}

impl MixCheck for TypeDiversityCheck {
    fn id(&self) -> &'static str {
        "type_diversity"
    }

    fn name(&self) -> &'static str {
        "Product Type Diversity"
    }

    fn evaluate(&self, products: &[Product], _table: &RuleTable) -> Vec<Finding> {
        let count = distinct_types(products).len();
        if count <= self.max_distinct_types {
            return Vec::new();
        }

        vec![Finding::advisory(
            self.id(),
            format!(
                "too many different product types ({}) - possible instability of the mix",
                count
            ),
        )]
    }
}
