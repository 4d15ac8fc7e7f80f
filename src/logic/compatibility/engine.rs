use super::{
    biological::BiologicalMixCheck, diversity::TypeDiversityCheck, pairwise::PairwiseRuleCheck,
    Finding, MixCheck, RuleTable,
};
use crate::config::CompatibilityConfig;
use crate::models::{CompatibilityVerdict, Product, Treatment};

/// Classifies whether a set of products may be combined in one tank.
///
/// Pure: the verdict depends only on the products and the rule table the
/// engine was built with.
pub struct CompatibilityEngine {
    table: RuleTable,
    checks: Vec<Box<dyn MixCheck>>,
}

impl CompatibilityEngine {
    pub fn new() -> Self {
        Self::with_table(RuleTable::builtin(), TypeDiversityCheck::default())
    }

    pub fn from_config(config: &CompatibilityConfig) -> Self {
        Self::with_table(
            config.rule_table(),
            TypeDiversityCheck::new(config.max_distinct_types),
        )
    }

    fn with_table(table: RuleTable, diversity: TypeDiversityCheck) -> Self {
        // Critical checks first; advisory messages keep this order.
        let checks: Vec<Box<dyn MixCheck>> = vec![
            Box::new(PairwiseRuleCheck),
            Box::new(diversity),
            Box::new(BiologicalMixCheck),
        ];

        Self { table, checks }
    }

    pub fn evaluate(&self, products: &[Product], is_tank_mix: bool) -> CompatibilityVerdict {
        let decisive = self.decisive_findings(products, is_tank_mix);
        let Some(level) = decisive.first().map(|f| f.level) else {
            return CompatibilityVerdict::clear();
        };

        let message = decisive
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        CompatibilityVerdict {
            level,
            message: Some(message),
        }
    }

    /// Findings behind the verdict: the critical ones if any, else the advisories.
    pub fn decisive_findings(&self, products: &[Product], is_tank_mix: bool) -> Vec<Finding> {
        if !is_tank_mix || products.len() <= 1 {
            return Vec::new();
        }

        let findings = self.findings(products);
        match findings.iter().map(|f| f.level).max() {
            Some(top) => findings.into_iter().filter(|f| f.level == top).collect(),
            None => Vec::new(),
        }
    }

    pub fn evaluate_treatment(&self, treatment: &Treatment) -> CompatibilityVerdict {
        self.evaluate(&treatment.chemical_products, treatment.is_tank_mix)
    }

    pub fn explain_treatment(&self, treatment: &Treatment) -> Vec<Finding> {
        self.decisive_findings(&treatment.chemical_products, treatment.is_tank_mix)
    }

    /// Every finding from every check, regardless of precedence.
    pub fn findings(&self, products: &[Product]) -> Vec<Finding> {
        self.checks
            .iter()
            .flat_map(|check| check.evaluate(products, &self.table))
            .collect()
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn list_checks(&self) -> Vec<(&'static str, &'static str)> {
        self.checks.iter().map(|c| (c.id(), c.name())).collect()
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}
