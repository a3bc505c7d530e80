//! Core use-case services.
//!
//! # Responsibility
//! - `WorkspaceService` owns persistence of every collection and the session.
//! - Flow services borrow it and add form validation and AI orchestration.
//! - Keep callers decoupled from slot encoding and transport details.

pub mod employee_service;
pub mod insight_service;
pub mod seed;
pub mod task_service;
pub mod workspace_service;
