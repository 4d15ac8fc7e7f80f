use super::ProductType;
use serde::{Deserialize, Serialize};

/// Static interaction entry for an unordered pair of product types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub type_a: ProductType,
    pub type_b: ProductType,
    pub compatible: bool,
    pub notes: String,
}

impl CompatibilityRule {
    pub fn new(type_a: ProductType, type_b: ProductType, compatible: bool, notes: &str) -> Self {
        Self {
            type_a,
            type_b,
            compatible,
            notes: notes.to_string(),
        }
    }

    /// The pair in normalized order, used as the symmetric lookup key.
    pub fn key(&self) -> (ProductType, ProductType) {
        pair_key(self.type_a, self.type_b)
    }
}

pub fn pair_key(a: ProductType, b: ProductType) -> (ProductType, ProductType) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    #[serde(rename = "none")]
    Clear,
    Advisory,
    Critical,
}

impl CompatibilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLevel::Clear => "none",
            CompatibilityLevel::Advisory => "advisory",
            CompatibilityLevel::Critical => "critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompatibilityLevel::Clear => "✓",
            CompatibilityLevel::Advisory => "⚠",
            CompatibilityLevel::Critical => "!",
        }
    }
}

impl std::fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of evaluating a tank mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    pub level: CompatibilityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CompatibilityVerdict {
    pub fn clear() -> Self {
        Self {
            level: CompatibilityLevel::Clear,
            message: None,
        }
    }

    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            level: CompatibilityLevel::Advisory,
            message: Some(message.into()),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            level: CompatibilityLevel::Critical,
            message: Some(message.into()),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.level == CompatibilityLevel::Clear
    }
}
