//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage port used by workspace services.
//! - Isolate slot encoding and SQL details from use-case orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Record::validate()` before persistence.
//! - Malformed persisted data is reported as `RepoError::InvalidData`,
//!   never replaced with an empty collection.

pub mod slot_store;
pub mod workspace_repo;
