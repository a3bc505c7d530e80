//! `AiGateway` over any `TextGenerator` transport.

use super::prompt::{strategy_prompt, task_assignment_prompt, weekly_report_prompt};
use super::schema::{ResponseSchema, ASSIGNMENT_SCHEMA, REPORT_SCHEMA, STRATEGY_SCHEMA};
use super::{
    AiGateway, AssignmentSuggestion, GatewayResult, ReportDraft, StrategyDraft, TextGenerator,
};
use crate::model::employee::Employee;
use crate::model::task::Task;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::time::Instant;

/// Builds prompts, calls the transport, and enforces response schemas.
pub struct ModelGateway<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> ModelGateway<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    fn request<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> GatewayResult<T> {
        let started_at = Instant::now();
        let result = self
            .generator
            .generate(prompt, schema)
            .and_then(|text| schema.parse::<T>(&text));

        match &result {
            Ok(_) => info!(
                "event=ai_request module=gateway status=ok operation={} prompt_chars={} duration_ms={}",
                operation,
                prompt.chars().count(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=ai_request module=gateway status=error operation={} duration_ms={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

impl<G: TextGenerator> AiGateway for ModelGateway<G> {
    fn generate_weekly_report(
        &self,
        employees: &[Employee],
        tasks: &[Task],
    ) -> GatewayResult<ReportDraft> {
        let prompt = weekly_report_prompt(employees, tasks)?;
        self.request("weekly_report", &prompt, &REPORT_SCHEMA)
    }

    fn suggest_task_assignment(
        &self,
        task: &Task,
        employees: &[Employee],
    ) -> GatewayResult<AssignmentSuggestion> {
        let prompt = task_assignment_prompt(task, employees)?;
        self.request("task_assignment", &prompt, &ASSIGNMENT_SCHEMA)
    }

    fn generate_strategy(&self, goal: &str) -> GatewayResult<StrategyDraft> {
        self.request("strategy", &strategy_prompt(goal), &STRATEGY_SCHEMA)
    }
}
