//! Workspace domain model.
//!
//! # Responsibility
//! - Define the records persisted by the workspace store.
//! - Keep the camelCase wire layout stable across storage and AI prompts.
//!
//! # Invariants
//! - Every persisted record carries a non-empty string id.
//! - Percentages (`workload`, `performance`) stay within `0..=100`.
//! - Records have no behavior beyond construction and validation.

pub mod employee;
pub mod insight;
pub mod task;
pub mod user;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for workload/performance percentages.
pub const MAX_PERCENT: u8 = 100;

/// Common identity and validation surface for persisted records.
pub trait Record {
    /// Stable record identifier.
    fn id(&self) -> &str;

    /// Checks record invariants before write and after read.
    fn validate(&self) -> Result<(), ModelValidationError>;
}

/// Validation errors for domain records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Record id is blank.
    EmptyId,
    /// A required text field is blank.
    EmptyField(&'static str),
    /// Percentage field is above `MAX_PERCENT`.
    PercentOutOfRange { field: &'static str, value: u8 },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record id must not be empty"),
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::PercentOutOfRange { field, value } => {
                write!(f, "{field} ({value}) must be within 0..={MAX_PERCENT}")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_id(id: &str) -> Result<(), ModelValidationError> {
    if id.trim().is_empty() {
        return Err(ModelValidationError::EmptyId);
    }
    Ok(())
}

/// Generates a prefixed record id such as `task-5f0c...`.
///
/// Uses a random v4 UUID so ids stay unique across sessions and processes.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
