//! AI gateway: domain requests in, schema-checked drafts out.
//!
//! # Responsibility
//! - Expose the three AI operations behind one narrow trait.
//! - Separate prompt/schema handling (`ModelGateway`) from transport
//!   (`TextGenerator`, implemented by `GeminiClient`).
//!
//! # Invariants
//! - Responses are accepted only when they match the declared schema exactly.
//! - Calls are single-shot: no retry, no caching.

mod gemini;
mod model_gateway;
pub mod prompt;
pub mod schema;

pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use model_gateway::ModelGateway;
pub use schema::{FieldKind, ResponseSchema};

use crate::model::employee::Employee;
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from AI gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network request failed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Model API returned a non-success status.
    #[error("model API error ({status}): {message}")]
    ApiResponse {
        status: u16,
        message: String,
        error_type: Option<String>,
    },

    /// Model refused the prompt or the answer.
    #[error("model blocked the request: {0}")]
    Blocked(String),

    /// No candidate text in the response.
    #[error("model returned no text")]
    EmptyResponse,

    /// Response text is not JSON.
    #[error("model response is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Response JSON does not match the declared schema.
    #[error("model response does not match schema: {0}")]
    SchemaMismatch(String),

    /// Prompt context could not be serialized.
    #[error("failed to encode prompt context: {0}")]
    Encode(#[source] serde_json::Error),

    /// Request could not be built from configuration.
    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Report fields produced by the model; the caller adds id and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub summary: String,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Assignment proposal; `employee_id` is unverified model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSuggestion {
    pub employee_id: String,
    pub reasoning: String,
}

/// Strategy fields produced by the model; the caller adds id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDraft {
    pub title: String,
    /// Markdown body.
    pub content: String,
}

/// The AI capability consumed by workspace flows.
pub trait AiGateway {
    fn generate_weekly_report(
        &self,
        employees: &[Employee],
        tasks: &[Task],
    ) -> GatewayResult<ReportDraft>;

    fn suggest_task_assignment(
        &self,
        task: &Task,
        employees: &[Employee],
    ) -> GatewayResult<AssignmentSuggestion>;

    fn generate_strategy(&self, goal: &str) -> GatewayResult<StrategyDraft>;
}

/// Transport that sends one prompt with a response schema and returns raw text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str, schema: &ResponseSchema) -> GatewayResult<String>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, prompt: &str, schema: &ResponseSchema) -> GatewayResult<String> {
        (**self).generate(prompt, schema)
    }
}
