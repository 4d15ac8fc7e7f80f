use super::{Finding, MixCheck, RuleTable};
use crate::models::Product;

/// Explicit incompatibility rules between two product types.
///
/// Every unordered pair of products in the mix is looked up in the rule table.
/// Pairs without a rule, or with an untyped product, are treated as compatible.
pub struct PairwiseRuleCheck;

impl MixCheck for PairwiseRuleCheck {
    fn id(&self) -> &'static str {
        "pairwise_rules"
    }

    fn name(&self) -> &'static str {
        "Pairwise Incompatibility"
    }

    fn evaluate(&self, products: &[Product], table: &RuleTable) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (i, first) in products.iter().enumerate() {
            for second in &products[i + 1..] {
                let (Some(type_a), Some(type_b)) = (first.product_type, second.product_type)
                else {
                    continue;
                };

                let Some(rule) = table.lookup(type_a, type_b) else {
                    continue;
                };

                tracing::debug!(
                    first = %first.name,
                    second = %second.name,
                    compatible = rule.compatible,
                    "Matched compatibility rule"
                );

                if !rule.compatible {
                    findings.push(Finding::critical(
                        self.id(),
                        format!(
                            "{} ({}) and {} ({}) - {}",
                            type_a, first.name, type_b, second.name, rule.notes
                        ),
                    ));
                }
            }
        }

        findings
    }
}
