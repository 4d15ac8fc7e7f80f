use crate::models::{pair_key, CompatibilityRule, ProductType};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Symmetric lookup over the static compatibility rules.
///
/// Each rule is stored once under its normalized pair, so `(A, B)` and `(B, A)`
/// resolve to the same entry. When several rules name the same pair the first
/// one wins.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: IndexMap<(ProductType, ProductType), CompatibilityRule>,
}

impl RuleTable {
    pub fn with_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = CompatibilityRule>,
    {
        let mut table = IndexMap::new();
        for rule in rules {
            match table.entry(rule.key()) {
                Entry::Vacant(slot) => {
                    slot.insert(rule);
                }
                Entry::Occupied(_) => {
                    tracing::debug!(
                        type_a = %rule.type_a,
                        type_b = %rule.type_b,
                        "Duplicate compatibility rule ignored"
                    );
                }
            }
        }
        Self { rules: table }
    }

    /// Default agronomic interaction table.
    pub fn builtin() -> Self {
        use ProductType::*;

        Self::with_rules([
            CompatibilityRule::new(
                Herbicide,
                GrowthRegulator,
                false,
                "risk of phytotoxicity, apply at least 7 days apart",
            ),
            CompatibilityRule::new(
                Herbicide,
                Desiccant,
                false,
                "both act on green tissue, the mix causes uncontrolled leaf burn",
            ),
            CompatibilityRule::new(
                Fungicide,
                Biological,
                false,
                "fungicide suppresses the living organisms of the biological product",
            ),
            CompatibilityRule::new(
                Desiccant,
                Fertilizer,
                false,
                "nutrients delay desiccation and reduce efficacy",
            ),
            CompatibilityRule::new(
                Desiccant,
                GrowthRegulator,
                false,
                "growth regulator counteracts desiccation",
            ),
            CompatibilityRule::new(
                Fungicide,
                Insecticide,
                true,
                "common combination, check solution pH",
            ),
            CompatibilityRule::new(
                Fungicide,
                Fertilizer,
                true,
                "compatible with foliar fertilizers, jar test recommended",
            ),
            CompatibilityRule::new(
                Insecticide,
                Fertilizer,
                true,
                "compatible at label rates",
            ),
            CompatibilityRule::new(
                Herbicide,
                Adjuvant,
                true,
                "adjuvant improves uptake",
            ),
            CompatibilityRule::new(
                Fungicide,
                Adjuvant,
                true,
                "adjuvant improves coverage",
            ),
            CompatibilityRule::new(
                Insecticide,
                Adjuvant,
                true,
                "adjuvant improves coverage",
            ),
            CompatibilityRule::new(
                Biological,
                Fertilizer,
                true,
                "nutrients support microbial activity",
            ),
        ])
    }

    /// Rule for an unordered pair of types, if one exists.
    pub fn lookup(&self, a: ProductType, b: ProductType) -> Option<&CompatibilityRule> {
        self.rules.get(&pair_key(a, b))
    }

    pub fn rules(&self) -> impl Iterator<Item = &CompatibilityRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_symmetric() {
        let table = RuleTable::builtin();
        let forward = table.lookup(ProductType::Herbicide, ProductType::GrowthRegulator);
        let backward = table.lookup(ProductType::GrowthRegulator, ProductType::Herbicide);
        assert!(forward.is_some());
        assert_eq!(forward, backward);
        assert!(!forward.unwrap().compatible);
    }

    #[test]
    fn missing_pair_has_no_rule() {
        let table = RuleTable::builtin();
        assert!(table
            .lookup(ProductType::Herbicide, ProductType::Biological)
            .is_none());
    }

    #[test]
    fn first_rule_for_a_pair_wins() {
        let table = RuleTable::with_rules([
            CompatibilityRule::new(ProductType::Herbicide, ProductType::Fungicide, false, "first"),
            CompatibilityRule::new(ProductType::Fungicide, ProductType::Herbicide, true, "second"),
        ]);
        assert_eq!(table.len(), 1);
        let rule = table
            .lookup(ProductType::Herbicide, ProductType::Fungicide)
            .unwrap();
        assert_eq!(rule.notes, "first");
    }

    #[test]
    fn builtin_has_no_duplicate_pairs() {
        // every built-in entry covers a distinct pair, so none is shadowed
        assert_eq!(RuleTable::builtin().len(), 12);
    }
}
