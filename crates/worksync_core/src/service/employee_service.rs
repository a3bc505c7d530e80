//! Employee onboarding use-case.
//!
//! # Invariants
//! - Name and email are required after trim.
//! - New employees start at 0% workload and 100% performance.

use crate::model::employee::{avatar_url, Employee};
use crate::model::generate_id;
use crate::repo::workspace_repo::WorkspaceStore;
use crate::service::workspace_service::{WorkspaceError, WorkspaceService};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NEW_EMPLOYEE_WORKLOAD: u8 = 0;
const NEW_EMPLOYEE_PERFORMANCE: u8 = 100;

/// Form input for a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    /// Comma-separated skill list as typed by the user.
    pub skills: String,
}

#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Required form field is blank.
    MissingField(&'static str),
    Workspace(WorkspaceError),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "employee {field} is required"),
            Self::Workspace(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Workspace(err) => Some(err),
            Self::MissingField(_) => None,
        }
    }
}

impl From<WorkspaceError> for EmployeeServiceError {
    fn from(value: WorkspaceError) -> Self {
        Self::Workspace(value)
    }
}

/// Employee flow over the shared workspace service.
pub struct EmployeeService<'a, S: WorkspaceStore> {
    workspace: &'a WorkspaceService<S>,
}

impl<'a, S: WorkspaceStore> EmployeeService<'a, S> {
    pub fn new(workspace: &'a WorkspaceService<S>) -> Self {
        Self { workspace }
    }

    pub fn list(&self) -> Result<Vec<Employee>, EmployeeServiceError> {
        Ok(self.workspace.employees()?)
    }

    /// Builds a full employee record from form input and persists it.
    pub fn create(&self, input: &NewEmployee) -> Result<Employee, EmployeeServiceError> {
        let name = input.name.trim();
        let email = input.email.trim();
        if name.is_empty() {
            return Err(EmployeeServiceError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(EmployeeServiceError::MissingField("email"));
        }

        let employee = Employee {
            id: generate_id("emp"),
            user_id: generate_id("user"),
            name: name.to_string(),
            email: email.to_string(),
            skills: parse_skills(&input.skills),
            workload: NEW_EMPLOYEE_WORKLOAD,
            performance: NEW_EMPLOYEE_PERFORMANCE,
            department: input.department.trim().to_string(),
            avatar: avatar_url(name),
        };
        Ok(self.workspace.add_employee(employee)?)
    }
}

/// Splits comma-separated skills, trimming and dropping empty entries.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}
