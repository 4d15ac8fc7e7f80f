use super::{distinct_types, Finding, MixCheck, RuleTable};
use crate::models::{Product, ProductType};

/// Living agents in biological products lose efficacy next to chemical
/// herbicides, insecticides and fungicides.
pub struct BiologicalMixCheck;

impl MixCheck for BiologicalMixCheck {
    fn id(&self) -> &'static str {
        "biological_mix"
    }

    fn name(&self) -> &'static str {
        "Biological With Chemical Agents"
    }

    fn evaluate(&self, products: &[Product], _table: &RuleTable) -> Vec<Finding> {
        let types = distinct_types(products);
        let has_biological = types.contains(&ProductType::Biological);
        let has_chemical = types.iter().any(|t| t.is_chemical_agent());

        if has_biological && has_chemical {
            vec![Finding::advisory(
                self.id(),
                "biologicals may lose efficacy when mixed with chemical agents",
            )]
        } else {
            Vec::new()
        }
    }
}
