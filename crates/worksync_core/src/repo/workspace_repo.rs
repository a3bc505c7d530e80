//! Workspace storage port and its slot-backed implementation.
//!
//! # Responsibility
//! - Expose the collection/session capability set used by services:
//!   get-collection, replace-collection, get-session, set-session,
//!   clear-session.
//! - Encode every collection as one JSON array per slot.
//!
//! # Invariants
//! - An absent slot reads as an empty collection (or no session).
//! - A present but undecodable slot is an error for the caller.
//! - Replacing a collection validates every record first; nothing is
//!   written when any record is invalid.

use crate::db::DbError;
use crate::model::employee::Employee;
use crate::model::insight::{AiReport, Strategy};
use crate::model::task::Task;
use crate::model::user::User;
use crate::model::{ModelValidationError, Record};
use crate::repo::slot_store::SlotStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key of the singleton session record.
pub const SESSION_KEY: &str = "ws_session";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    /// Slot content could not be decoded.
    InvalidData {
        key: &'static str,
        message: String,
    },
    /// Records could not be encoded for writing.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted data in slot `{key}`: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode records: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Named collections held by the workspace store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Tasks,
    Reports,
    Strategies,
}

/// Where `add` places a new record inside its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Oldest-first collections.
    Append,
    /// Newest-first collections.
    Prepend,
}

impl Collection {
    /// Durable slot key.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Employees => "ws_employees",
            Self::Tasks => "ws_tasks",
            Self::Reports => "ws_reports",
            Self::Strategies => "ws_strategies",
        }
    }

    pub fn placement(self) -> Placement {
        match self {
            Self::Employees | Self::Tasks => Placement::Append,
            Self::Reports | Self::Strategies => Placement::Prepend,
        }
    }

    /// Short name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Tasks => "tasks",
            Self::Reports => "reports",
            Self::Strategies => "strategies",
        }
    }
}

/// A record type that lives in exactly one named collection.
pub trait CollectionRecord: Record + Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;
}

impl CollectionRecord for Employee {
    const COLLECTION: Collection = Collection::Employees;
}

impl CollectionRecord for Task {
    const COLLECTION: Collection = Collection::Tasks;
}

impl CollectionRecord for AiReport {
    const COLLECTION: Collection = Collection::Reports;
}

impl CollectionRecord for Strategy {
    const COLLECTION: Collection = Collection::Strategies;
}

/// Storage port injected into workspace services.
pub trait WorkspaceStore {
    /// Returns whether the collection slot exists, even if it holds `[]`.
    fn has_collection(&self, collection: Collection) -> RepoResult<bool>;
    fn get_collection<T: CollectionRecord>(&self) -> RepoResult<Vec<T>>;
    fn replace_collection<T: CollectionRecord>(&self, records: &[T]) -> RepoResult<()>;
    fn get_session(&self) -> RepoResult<Option<User>>;
    fn set_session(&self, user: &User) -> RepoResult<()>;
    fn clear_session(&self) -> RepoResult<()>;
}

impl<S: SlotStore> WorkspaceStore for S {
    fn has_collection(&self, collection: Collection) -> RepoResult<bool> {
        Ok(self.read_slot(collection.storage_key())?.is_some())
    }

    fn get_collection<T: CollectionRecord>(&self) -> RepoResult<Vec<T>> {
        let key = T::COLLECTION.storage_key();
        let Some(text) = self.read_slot(key)? else {
            return Ok(Vec::new());
        };

        let records: Vec<T> = decode_slot(key, &text)?;
        for record in &records {
            record.validate().map_err(|err| RepoError::InvalidData {
                key,
                message: format!("record `{}`: {err}", record.id()),
            })?;
        }
        Ok(records)
    }

    fn replace_collection<T: CollectionRecord>(&self, records: &[T]) -> RepoResult<()> {
        for record in records {
            record.validate()?;
        }
        let text = serde_json::to_string(records).map_err(RepoError::Encode)?;
        self.write_slot(T::COLLECTION.storage_key(), &text)?;
        Ok(())
    }

    fn get_session(&self) -> RepoResult<Option<User>> {
        match self.read_slot(SESSION_KEY)? {
            Some(text) => decode_slot(SESSION_KEY, &text).map(Some),
            None => Ok(None),
        }
    }

    fn set_session(&self, user: &User) -> RepoResult<()> {
        let text = serde_json::to_string(user).map_err(RepoError::Encode)?;
        self.write_slot(SESSION_KEY, &text)?;
        Ok(())
    }

    fn clear_session(&self) -> RepoResult<()> {
        self.delete_slot(SESSION_KEY)?;
        Ok(())
    }
}

fn decode_slot<T: DeserializeOwned>(key: &'static str, text: &str) -> RepoResult<T> {
    serde_json::from_str(text).map_err(|err| RepoError::InvalidData {
        key,
        message: err.to_string(),
    })
}
