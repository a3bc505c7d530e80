//! Employee model.
//!
//! # Invariants
//! - `workload` and `performance` are percentages within `0..=100`.
//! - `skills` ordering carries no meaning.

use super::{require_id, ModelValidationError, Record, MAX_PERCENT};
use serde::{Deserialize, Serialize};

/// Team member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    /// Current load in percent.
    pub workload: u8,
    /// Performance score in percent.
    pub performance: u8,
    pub department: String,
    pub avatar: String,
}

impl Employee {
    /// Returns whether this employee lists `skill`, ignoring ASCII case.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(skill.trim()))
    }
}

impl Record for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_id(&self.id)?;
        if self.workload > MAX_PERCENT {
            return Err(ModelValidationError::PercentOutOfRange {
                field: "workload",
                value: self.workload,
            });
        }
        if self.performance > MAX_PERCENT {
            return Err(ModelValidationError::PercentOutOfRange {
                field: "performance",
                value: self.performance,
            });
        }
        Ok(())
    }
}

/// Avatar URL derived from a display seed.
pub fn avatar_url(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/100/100")
}
