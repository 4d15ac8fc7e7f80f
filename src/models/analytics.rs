use super::{Culture, ProductType};
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Serialize, Serializer};

/// Per-culture rollup of treatment history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureStats {
    pub culture: Culture,
    pub total_treatments: usize,
    pub completed_treatments: usize,
    pub planned_treatments: usize,
    pub last_treatment: Option<NaiveDate>,
    /// Distinct product names in first-seen order.
    pub products_used: IndexSet<String>,
    pub tank_mix_count: usize,
    /// Distinct sorted type signatures of the tank mixes, first-seen order.
    pub tank_mix_types: IndexSet<Vec<ProductType>>,
}

impl CultureStats {
    pub fn new(culture: Culture) -> Self {
        Self {
            culture,
            total_treatments: 0,
            completed_treatments: 0,
            planned_treatments: 0,
            last_treatment: None,
            products_used: IndexSet::new(),
            tank_mix_count: 0,
            tank_mix_types: IndexSet::new(),
        }
    }

    pub fn completion_rate(&self) -> Option<f64> {
        if self.total_treatments == 0 {
            None
        } else {
            Some(self.completed_treatments as f64 / self.total_treatments as f64)
        }
    }

    /// Tank-mix signatures joined as `a + b`. Mixes of only untyped
    /// products have an empty signature and are left out.
    pub fn tank_mix_labels(&self) -> Vec<String> {
        self.tank_mix_types
            .iter()
            .filter(|sig| !sig.is_empty())
            .map(|sig| {
                sig.iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(" + ")
            })
            .collect()
    }
}

/// What was applied at a timeline point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Product(ProductType),
    TankMix,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Product(t) => t.as_str(),
            EventKind::TankMix => "tank mix",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub treatment_id: i64,
    pub date: NaiveDate,
    pub products: Vec<String>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tank_mix_types: Option<Vec<ProductType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CultureTimeline {
    pub culture: Culture,
    pub treatments: Vec<TimelineEvent>,
}

impl CultureTimeline {
    pub fn is_empty(&self) -> bool {
        self.treatments.is_empty()
    }
}
