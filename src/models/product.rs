use serde::{Deserialize, Deserializer, Serialize};

/// Category of a chemical product.
///
/// Variants are declared in the lexical order of their wire names so the
/// derived ordering matches a plain string sort of the names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Adjuvant,
    Biological,
    Desiccant,
    Fertilizer,
    Fungicide,
    GrowthRegulator,
    Herbicide,
    Insecticide,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Adjuvant => "adjuvant",
            ProductType::Biological => "biological",
            ProductType::Desiccant => "desiccant",
            ProductType::Fertilizer => "fertilizer",
            ProductType::Fungicide => "fungicide",
            ProductType::GrowthRegulator => "growth-regulator",
            ProductType::Herbicide => "herbicide",
            ProductType::Insecticide => "insecticide",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "adjuvant" => Some(ProductType::Adjuvant),
            "biological" => Some(ProductType::Biological),
            "desiccant" => Some(ProductType::Desiccant),
            "fertilizer" => Some(ProductType::Fertilizer),
            "fungicide" => Some(ProductType::Fungicide),
            "growth-regulator" | "growthregulator" => Some(ProductType::GrowthRegulator),
            "herbicide" => Some(ProductType::Herbicide),
            "insecticide" => Some(ProductType::Insecticide),
            _ => None,
        }
    }

    pub fn all() -> &'static [ProductType] {
        &[
            ProductType::Adjuvant,
            ProductType::Biological,
            ProductType::Desiccant,
            ProductType::Fertilizer,
            ProductType::Fungicide,
            ProductType::GrowthRegulator,
            ProductType::Herbicide,
            ProductType::Insecticide,
        ]
    }

    /// Synthetic crop-protection agents, as opposed to biologicals and nutrition.
    pub fn is_chemical_agent(&self) -> bool {
        matches!(
            self,
            ProductType::Herbicide | ProductType::Insecticide | ProductType::Fungicide
        )
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One chemical product as used in a treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default, deserialize_with = "deserialize_product_type")]
    pub product_type: Option<ProductType>,
}

impl Product {
    pub fn new(name: &str, product_type: ProductType) -> Self {
        Self {
            name: name.to_string(),
            dosage: String::new(),
            product_type: Some(product_type),
        }
    }

    pub fn with_dosage(mut self, dosage: &str) -> Self {
        self.dosage = dosage.to_string();
        self
    }
}

fn deserialize_product_type<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<ProductType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        if s.is_empty() {
            return None;
        }
        ProductType::from_str(&s).or_else(|| {
            tracing::warn!(product_type = %s, "Unknown product type, treating as untyped");
            None
        })
    }))
}
