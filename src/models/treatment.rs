use super::{Culture, Product};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One planned or completed application event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: i64,
    pub culture: Culture,
    pub area: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_tank_mix: bool,
    #[serde(default)]
    pub chemical_products: Vec<Product>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Treatment {
    pub fn new(id: i64, culture: Culture, area: f64) -> Self {
        Self {
            id,
            culture,
            area,
            completed: false,
            due_date: None,
            actual_date: None,
            is_tank_mix: false,
            chemical_products: Vec::new(),
            notes: None,
        }
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Marks the treatment completed on `date`.
    pub fn completed_on(mut self, date: NaiveDate) -> Self {
        self.completed = true;
        self.actual_date = Some(date);
        self
    }

    pub fn tank_mix(mut self) -> Self {
        self.is_tank_mix = true;
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.chemical_products.push(product);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn product_names(&self) -> Vec<String> {
        self.chemical_products.iter().map(|p| p.name.clone()).collect()
    }

    /// Invariants the record should satisfy but that are not enforced here.
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.area.is_nan() || self.area <= 0.0 {
            issues.push(format!("area must be positive, got {}", self.area));
        }
        if self.chemical_products.is_empty() {
            issues.push("no chemical products".to_string());
        }
        if self.completed && self.actual_date.is_none() {
            issues.push("completed without an actual date".to_string());
        }
        if !self.completed && self.actual_date.is_some() {
            issues.push("actual date set on a planned treatment".to_string());
        }
        if !self.is_tank_mix && self.chemical_products.len() > 1 {
            issues.push(format!(
                "{} products on a treatment not marked as tank mix",
                self.chemical_products.len()
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn treatment_builder_pattern() {
        let t = Treatment::new(7, Culture::Apple, 2.5)
            .with_due_date(date(2024, 4, 1))
            .completed_on(date(2024, 4, 3))
            .tank_mix()
            .with_product(Product::new("Score", ProductType::Fungicide))
            .with_product(Product::new("Karate", ProductType::Insecticide))
            .with_notes("Early bloom");

        assert_eq!(t.id, 7);
        assert!(t.completed);
        assert!(t.is_tank_mix);
        assert_eq!(t.actual_date, Some(date(2024, 4, 3)));
        assert_eq!(t.product_names(), vec!["Score", "Karate"]);
        assert_eq!(t.notes, Some("Early bloom".to_string()));
        assert!(t.consistency_issues().is_empty());
    }

    #[test]
    fn treatment_deserializes_camel_case_document() {
        let json = r#"{
            "id": 3,
            "culture": "potato",
            "area": 12.0,
            "completed": false,
            "dueDate": "2024-06-01",
            "isTankMix": false,
            "chemicalProducts": [
                {"name": "Ridomil", "dosage": "2.5 kg/ha", "productType": "fungicide"}
            ]
        }"#;
        let t: Treatment = serde_json::from_str(json).unwrap();
        assert_eq!(t.culture, Culture::Potato);
        assert_eq!(t.due_date, Some(date(2024, 6, 1)));
        assert_eq!(t.actual_date, None);
        assert_eq!(t.notes, None);
        assert_eq!(t.chemical_products.len(), 1);
    }

    #[test]
    fn consistency_issues_are_reported() {
        let t = Treatment::new(1, Culture::Wheat, 0.0)
            .with_product(Product::new("A", ProductType::Herbicide))
            .with_product(Product::new("B", ProductType::Fungicide));
        let mut broken = t.clone();
        broken.completed = true;

        let issues = broken.consistency_issues();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.contains("area")));
        assert!(issues.iter().any(|i| i.contains("actual date")));
        assert!(issues.iter().any(|i| i.contains("tank mix")));

        let empty = Treatment::new(2, Culture::Wheat, 1.0);
        assert_eq!(empty.consistency_issues(), vec!["no chemical products"]);
    }
}
