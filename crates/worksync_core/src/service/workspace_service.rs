//! Workspace persistence use-case service.
//!
//! # Responsibility
//! - Seed, read and append the named workspace collections.
//! - Synthesize and persist the singleton session user.
//!
//! # Invariants
//! - `initialize` only writes slots that are absent.
//! - Every `add_*` is a full read-modify-replace of one collection,
//!   followed by a read-back; callers receive the persisted record.
//! - Ids are unique within a collection.
//! - Concurrent writers are not coordinated; the last replace wins.

use crate::model::employee::Employee;
use crate::model::insight::{AiReport, Strategy};
use crate::model::task::Task;
use crate::model::user::{User, UserRole};
use crate::model::Record;
use crate::repo::workspace_repo::{
    Collection, CollectionRecord, Placement, RepoError, WorkspaceStore,
};
use crate::service::seed::{default_employees, default_tasks};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SESSION_USER_ID: &str = "admin-1";
const SESSION_COMPANY_ID: &str = "company-1";
const SESSION_AVATAR: &str = "https://picsum.photos/seed/admin/100/100";

/// Errors from workspace persistence operations.
#[derive(Debug)]
pub enum WorkspaceError {
    /// Storage or decoding failure.
    Repo(RepoError),
    /// A record with the same id already exists in the collection.
    DuplicateId {
        collection: Collection,
        id: String,
    },
    /// No record with the id exists in the collection.
    NotFound {
        collection: Collection,
        id: String,
    },
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "{} already contains id `{id}`", collection.name())
            }
            Self::NotFound { collection, id } => {
                write!(f, "{} has no record with id `{id}`", collection.name())
            }
            Self::InconsistentState(details) => {
                write!(f, "inconsistent workspace state: {details}")
            }
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WorkspaceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Persistence facade over an injected `WorkspaceStore`.
pub struct WorkspaceService<S: WorkspaceStore> {
    store: S,
}

impl<S: WorkspaceStore> WorkspaceService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seeds employees and tasks when their slots are absent.
    ///
    /// Existing slots are never touched, including ones holding `[]`.
    pub fn initialize(&self) -> WorkspaceResult<()> {
        if !self.store.has_collection(Collection::Employees)? {
            self.store.replace_collection(&default_employees())?;
            info!("event=workspace_seed module=service status=ok collection=employees");
        }
        if !self.store.has_collection(Collection::Tasks)? {
            self.store.replace_collection(&default_tasks())?;
            info!("event=workspace_seed module=service status=ok collection=tasks");
        }
        Ok(())
    }

    /// Returns the persisted session user, if any.
    pub fn session(&self) -> WorkspaceResult<Option<User>> {
        Ok(self.store.get_session()?)
    }

    /// Builds the session user for `identifier` and persists it.
    ///
    /// No credential is checked. The display name is the local part
    /// before the first `@`, or the whole identifier when it has none.
    pub fn login(&self, identifier: &str) -> WorkspaceResult<User> {
        let user = session_user(identifier);
        self.store.set_session(&user)?;
        info!("event=session_login module=service status=ok role=admin");
        Ok(user)
    }

    /// Removes the session slot.
    pub fn logout(&self) -> WorkspaceResult<()> {
        self.store.clear_session()?;
        info!("event=session_logout module=service status=ok");
        Ok(())
    }

    pub fn employees(&self) -> WorkspaceResult<Vec<Employee>> {
        Ok(self.store.get_collection()?)
    }

    pub fn tasks(&self) -> WorkspaceResult<Vec<Task>> {
        Ok(self.store.get_collection()?)
    }

    /// Reports, newest first.
    pub fn reports(&self) -> WorkspaceResult<Vec<AiReport>> {
        Ok(self.store.get_collection()?)
    }

    /// Strategies, newest first.
    pub fn strategies(&self) -> WorkspaceResult<Vec<Strategy>> {
        Ok(self.store.get_collection()?)
    }

    /// Appends one employee.
    pub fn add_employee(&self, employee: Employee) -> WorkspaceResult<Employee> {
        self.add_record(employee)
    }

    /// Appends one task. The assignee reference is stored as given.
    pub fn add_task(&self, task: Task) -> WorkspaceResult<Task> {
        self.add_record(task)
    }

    /// Prefixes one report so the collection stays newest-first.
    pub fn add_report(&self, report: AiReport) -> WorkspaceResult<AiReport> {
        self.add_record(report)
    }

    /// Prefixes one strategy so the collection stays newest-first.
    pub fn add_strategy(&self, strategy: Strategy) -> WorkspaceResult<Strategy> {
        self.add_record(strategy)
    }

    /// Replaces the task with the same id, keeping its position.
    pub fn replace_task(&self, task: Task) -> WorkspaceResult<Task> {
        task.validate().map_err(RepoError::from)?;
        let mut tasks: Vec<Task> = self.store.get_collection()?;
        let slot = tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or_else(|| WorkspaceError::NotFound {
                collection: Collection::Tasks,
                id: task.id.clone(),
            })?;
        *slot = task.clone();
        self.store.replace_collection(&tasks)?;
        self.read_back(&task.id)
    }

    fn add_record<T: CollectionRecord>(&self, record: T) -> WorkspaceResult<T> {
        let collection = T::COLLECTION;
        record.validate().map_err(RepoError::from)?;

        let mut records: Vec<T> = self.store.get_collection()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            warn!(
                "event=record_add module=service status=rejected collection={} reason=duplicate_id",
                collection.name()
            );
            return Err(WorkspaceError::DuplicateId {
                collection,
                id: record.id().to_string(),
            });
        }

        let id = record.id().to_string();
        match collection.placement() {
            Placement::Append => records.push(record),
            Placement::Prepend => records.insert(0, record),
        }
        self.store.replace_collection(&records)?;
        info!(
            "event=record_add module=service status=ok collection={} size={}",
            collection.name(),
            records.len()
        );

        self.read_back(&id)
    }

    fn read_back<T: CollectionRecord>(&self, id: &str) -> WorkspaceResult<T> {
        self.store
            .get_collection::<T>()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or(WorkspaceError::InconsistentState(
                "written record not found in read-back",
            ))
    }
}

fn session_user(identifier: &str) -> User {
    let name = identifier.split('@').next().unwrap_or_default();
    User {
        id: SESSION_USER_ID.to_string(),
        name: name.to_string(),
        email: identifier.to_string(),
        role: UserRole::Admin,
        company_id: SESSION_COMPANY_ID.to_string(),
        avatar: Some(SESSION_AVATAR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::session_user;
    use crate::model::user::UserRole;

    #[test]
    fn session_user_name_is_local_part() {
        let user = session_user("demo@worksync.ai");
        assert_eq!(user.name, "demo");
        assert_eq!(user.email, "demo@worksync.ai");
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.company_id, "company-1");
    }

    #[test]
    fn session_user_without_at_sign_uses_whole_identifier() {
        assert_eq!(session_user("operator").name, "operator");
        assert_eq!(session_user("").name, "");
    }
}
