//! AI report and strategy use-cases.
//!
//! # Invariants
//! - Nothing is persisted when the gateway call fails.
//! - Reports and strategies are stored newest-first.

use crate::gateway::{AiGateway, GatewayError};
use crate::model::generate_id;
use crate::model::insight::{AiReport, Strategy};
use crate::repo::workspace_repo::WorkspaceStore;
use crate::service::workspace_service::{WorkspaceError, WorkspaceService};
use chrono::Utc;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title stored when the model returns a blank one.
pub const UNTITLED_STRATEGY: &str = "Untitled Strategy";

#[derive(Debug)]
pub enum InsightServiceError {
    /// Strategy goal is blank after trim.
    MissingGoal,
    Workspace(WorkspaceError),
    Gateway(GatewayError),
}

impl Display for InsightServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGoal => write!(f, "strategy goal is required"),
            Self::Workspace(err) => write!(f, "{err}"),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InsightServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingGoal => None,
            Self::Workspace(err) => Some(err),
            Self::Gateway(err) => Some(err),
        }
    }
}

impl From<WorkspaceError> for InsightServiceError {
    fn from(value: WorkspaceError) -> Self {
        Self::Workspace(value)
    }
}

impl From<GatewayError> for InsightServiceError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

/// Report/strategy flow over the shared workspace service and an AI gateway.
pub struct InsightService<'a, S: WorkspaceStore, A: AiGateway> {
    workspace: &'a WorkspaceService<S>,
    gateway: &'a A,
}

impl<'a, S: WorkspaceStore, A: AiGateway> InsightService<'a, S, A> {
    pub fn new(workspace: &'a WorkspaceService<S>, gateway: &'a A) -> Self {
        Self { workspace, gateway }
    }

    pub fn reports(&self) -> Result<Vec<AiReport>, InsightServiceError> {
        Ok(self.workspace.reports()?)
    }

    pub fn strategies(&self) -> Result<Vec<Strategy>, InsightServiceError> {
        Ok(self.workspace.strategies()?)
    }

    /// Generates a weekly report from the current team and board.
    pub fn generate_report(&self) -> Result<AiReport, InsightServiceError> {
        let employees = self.workspace.employees()?;
        let tasks = self.workspace.tasks()?;
        let draft = self
            .gateway
            .generate_weekly_report(&employees, &tasks)
            .map_err(|err| {
                error!("event=report_generate module=service status=error error={err}");
                err
            })?;

        let report = AiReport {
            id: generate_id("rep"),
            generated_at: Utc::now().date_naive(),
            summary: draft.summary,
            key_insights: draft.key_insights,
            recommendations: draft.recommendations,
        };
        Ok(self.workspace.add_report(report)?)
    }

    /// Generates a strategy for `goal`.
    pub fn generate_strategy(&self, goal: &str) -> Result<Strategy, InsightServiceError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(InsightServiceError::MissingGoal);
        }

        let draft = self.gateway.generate_strategy(goal).map_err(|err| {
            error!("event=strategy_generate module=service status=error error={err}");
            err
        })?;

        let title = match draft.title.trim() {
            "" => UNTITLED_STRATEGY.to_string(),
            title => title.to_string(),
        };
        let strategy = Strategy {
            id: generate_id("strat"),
            title,
            content: draft.content,
            updated_at: Utc::now(),
        };
        Ok(self.workspace.add_strategy(strategy)?)
    }
}
