//! AI-derived records: weekly reports and strategies.
//!
//! Both collections are append-only and kept newest-first.

use super::{require_id, ModelValidationError, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Generated weekly performance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReport {
    pub id: String,
    /// Generation day, serialized as `YYYY-MM-DD`.
    pub generated_at: NaiveDate,
    pub summary: String,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Record for AiReport {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_id(&self.id)
    }
}

/// Generated business strategy with Markdown content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl Record for Strategy {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        require_id(&self.id)?;
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::EmptyField("title"));
        }
        Ok(())
    }
}
