use serde::{Deserialize, Deserializer, Serialize};

/// Crop a treatment is applied to.
///
/// Deserialization goes through [`Culture::from_str`], so stored documents
/// accept the same aliases as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    Apple,
    Pear,
    Cherry,
    Plum,
    Apricot,
    Peach,
    Grape,
    Strawberry,
    Raspberry,
    Potato,
    Wheat,
    Corn,
    Sunflower,
    Rapeseed,
}

impl Culture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Culture::Apple => "apple",
            Culture::Pear => "pear",
            Culture::Cherry => "cherry",
            Culture::Plum => "plum",
            Culture::Apricot => "apricot",
            Culture::Peach => "peach",
            Culture::Grape => "grape",
            Culture::Strawberry => "strawberry",
            Culture::Raspberry => "raspberry",
            Culture::Potato => "potato",
            Culture::Wheat => "wheat",
            Culture::Corn => "corn",
            Culture::Sunflower => "sunflower",
            Culture::Rapeseed => "rapeseed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "apple" | "apples" => Some(Culture::Apple),
            "pear" | "pears" => Some(Culture::Pear),
            "cherry" | "cherries" => Some(Culture::Cherry),
            "plum" | "plums" => Some(Culture::Plum),
            "apricot" | "apricots" => Some(Culture::Apricot),
            "peach" | "peaches" => Some(Culture::Peach),
            "grape" | "grapes" | "vine" => Some(Culture::Grape),
            "strawberry" | "strawberries" => Some(Culture::Strawberry),
            "raspberry" | "raspberries" => Some(Culture::Raspberry),
            "potato" | "potatoes" => Some(Culture::Potato),
            "wheat" => Some(Culture::Wheat),
            "corn" | "maize" => Some(Culture::Corn),
            "sunflower" => Some(Culture::Sunflower),
            "rapeseed" | "canola" => Some(Culture::Rapeseed),
            _ => None,
        }
    }

    pub fn all() -> &'static [Culture] {
        &[
            Culture::Apple,
            Culture::Pear,
            Culture::Cherry,
            Culture::Plum,
            Culture::Apricot,
            Culture::Peach,
            Culture::Grape,
            Culture::Strawberry,
            Culture::Raspberry,
            Culture::Potato,
            Culture::Wheat,
            Culture::Corn,
            Culture::Sunflower,
            Culture::Rapeseed,
        ]
    }
}

impl std::fmt::Display for Culture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Culture {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        Culture::from_str(&value).ok_or_else(|| {
            D::Error::custom(format!(
                "unknown culture '{}', expected one of: {}",
                value,
                Culture::all()
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}
