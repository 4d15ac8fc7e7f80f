use crate::error::{FarmLogError, Result};
use crate::models::Treatment;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Read-only view of the treatment document written by the record-keeping app.
pub struct TreatmentStore {
    path: PathBuf,
}

impl TreatmentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Treatment>> {
        if !self.path.exists() {
            return Err(FarmLogError::NotFound(format!(
                "treatments file {}",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let treatments = Self::from_json_str(&content)?;
        info!(
            path = %self.path.display(),
            count = treatments.len(),
            "Loaded treatments"
        );
        Ok(treatments)
    }

    /// Parse a treatment document: a bare array or `{ "treatments": [...] }`.
    pub fn from_json_str(content: &str) -> Result<Vec<Treatment>> {
        let document: Value = serde_json::from_str(content)?;
        let records = match document {
            Value::Array(records) => records,
            Value::Object(mut document) => match document.remove("treatments") {
                Some(Value::Array(records)) => records,
                Some(_) => {
                    return Err(FarmLogError::InvalidData(
                        "\"treatments\" must be an array".into(),
                    ))
                }
                None => {
                    return Err(FarmLogError::InvalidData(
                        "document has no \"treatments\" array".into(),
                    ))
                }
            },
            _ => {
                return Err(FarmLogError::InvalidData(
                    "expected an array of treatments or { \"treatments\": [...] }".into(),
                ))
            }
        };

        let treatments = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<Treatment>(record).map_err(|e| {
                    FarmLogError::InvalidData(format!("treatment #{}: {}", index + 1, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for treatment in &treatments {
            for issue in treatment.consistency_issues() {
                warn!(id = treatment.id, culture = %treatment.culture, "{}", issue);
            }
        }

        let mut ids: Vec<i64> = treatments.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(FarmLogError::InvalidData(format!(
                "duplicate treatment id {}",
                dup[0]
            )));
        }

        Ok(treatments)
    }
}
