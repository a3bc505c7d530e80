//! Task board use-cases.
//!
//! # Responsibility
//! - Create tasks from form input with a resolved assignee.
//! - Move tasks between board columns.
//! - Ask the AI gateway for an assignee and resolve it against the team.
//!
//! # Invariants
//! - No task is stored with a blank or unknown assignee.
//! - Board moves replace the whole task record; only `status` changes.
//! - A suggested employee id that does not resolve yields no suggestion.

use crate::gateway::{AiGateway, GatewayError};
use crate::model::employee::Employee;
use crate::model::generate_id;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::repo::workspace_repo::{Collection, WorkspaceStore};
use crate::service::workspace_service::{WorkspaceError, WorkspaceService};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub assigned_to_id: String,
    pub due_date: NaiveDate,
    pub skills_required: Vec<String>,
}

/// Gateway suggestion resolved to a known employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSuggestion {
    pub employee: Employee,
    pub reasoning: String,
    /// Required skills of the task that the employee lists.
    pub matched_skills: Vec<String>,
}

#[derive(Debug)]
pub enum TaskServiceError {
    /// Title is blank after trim.
    MissingTitle,
    /// The team is empty, so no assignee can resolve.
    NoEmployees,
    /// Assignee id is blank or not in the employee collection.
    UnknownAssignee(String),
    /// Target task does not exist.
    TaskNotFound(String),
    Workspace(WorkspaceError),
    Gateway(GatewayError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "task title is required"),
            Self::NoEmployees => write!(f, "cannot create a task without employees"),
            Self::UnknownAssignee(id) => write!(f, "assignee `{id}` is not a known employee"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Workspace(err) => write!(f, "{err}"),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Workspace(err) => Some(err),
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WorkspaceError> for TaskServiceError {
    fn from(value: WorkspaceError) -> Self {
        match value {
            WorkspaceError::NotFound {
                collection: Collection::Tasks,
                id,
            } => Self::TaskNotFound(id),
            other => Self::Workspace(other),
        }
    }
}

impl From<GatewayError> for TaskServiceError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

/// Task flow over the shared workspace service.
pub struct TaskService<'a, S: WorkspaceStore> {
    workspace: &'a WorkspaceService<S>,
}

impl<'a, S: WorkspaceStore> TaskService<'a, S> {
    pub fn new(workspace: &'a WorkspaceService<S>) -> Self {
        Self { workspace }
    }

    pub fn list(&self) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.workspace.tasks()?)
    }

    /// Tasks grouped into board columns, in column order.
    pub fn board(&self) -> Result<Vec<(TaskStatus, Vec<Task>)>, TaskServiceError> {
        let tasks = self.workspace.tasks()?;
        Ok(TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let column = tasks
                    .iter()
                    .filter(|task| task.status == status)
                    .cloned()
                    .collect();
                (status, column)
            })
            .collect())
    }

    /// Creates a `TODO` task after resolving its assignee.
    pub fn create(&self, input: &NewTask) -> Result<Task, TaskServiceError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(TaskServiceError::MissingTitle);
        }

        let employees = self.workspace.employees()?;
        if employees.is_empty() {
            return Err(TaskServiceError::NoEmployees);
        }
        let assignee = input.assigned_to_id.trim();
        if !employees.iter().any(|employee| employee.id == assignee) {
            return Err(TaskServiceError::UnknownAssignee(assignee.to_string()));
        }

        let task = Task {
            id: generate_id("task"),
            title: title.to_string(),
            description: input.description.trim().to_string(),
            status: TaskStatus::Todo,
            priority: input.priority,
            assigned_to_id: assignee.to_string(),
            due_date: input.due_date,
            skills_required: input.skills_required.clone(),
        };
        Ok(self.workspace.add_task(task)?)
    }

    /// Moves a task to `status`, allowing any column-to-column move.
    pub fn move_task(&self, task_id: &str, status: TaskStatus) -> Result<Task, TaskServiceError> {
        let mut task = self.find(task_id)?;
        if task.status == status {
            return Ok(task);
        }
        let previous = task.status;
        task.status = status;
        let task = self.workspace.replace_task(task)?;
        info!(
            "event=task_move module=service status=ok from={} to={}",
            previous, status
        );
        Ok(task)
    }

    /// Asks `gateway` who should own `task_id`.
    ///
    /// Returns `Ok(None)` when the suggested id is not a current employee.
    pub fn suggest_assignee(
        &self,
        task_id: &str,
        gateway: &impl AiGateway,
    ) -> Result<Option<ResolvedSuggestion>, TaskServiceError> {
        let task = self.find(task_id)?;
        let employees = self.workspace.employees()?;
        let suggestion = gateway
            .suggest_task_assignment(&task, &employees)
            .map_err(|err| {
                error!("event=task_suggest module=service status=error error={err}");
                err
            })?;

        let resolved = employees
            .into_iter()
            .find(|employee| employee.id == suggestion.employee_id);
        match resolved {
            Some(employee) => {
                let matched_skills = task
                    .skills_required
                    .iter()
                    .filter(|skill| employee.has_skill(skill))
                    .cloned()
                    .collect();
                Ok(Some(ResolvedSuggestion {
                    employee,
                    reasoning: suggestion.reasoning,
                    matched_skills,
                }))
            }
            None => {
                warn!("event=task_suggest module=service status=unresolved reason=unknown_employee");
                Ok(None)
            }
        }
    }

    fn find(&self, task_id: &str) -> Result<Task, TaskServiceError> {
        self.workspace
            .tasks()?
            .into_iter()
            .find(|task| task.id == task_id)
            .ok_or_else(|| TaskServiceError::TaskNotFound(task_id.to_string()))
    }
}
