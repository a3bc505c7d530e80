//! Core domain logic for WorkSync.
//! This crate owns workspace persistence, session handling and AI orchestration.

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, WorkspaceConfig};
pub use gateway::{
    AiGateway, AssignmentSuggestion, GatewayError, GatewayResult, GeminiClient, GeminiConfig,
    ModelGateway, ReportDraft, StrategyDraft, TextGenerator,
};
pub use logging::{init_logging, LoggingError};
pub use model::employee::Employee;
pub use model::insight::{AiReport, Strategy};
pub use model::task::{Task, TaskPriority, TaskStatus};
pub use model::user::{User, UserRole};
pub use model::{ModelValidationError, Record};
pub use repo::slot_store::{MemorySlotStore, SlotStore, SqliteSlotStore};
pub use repo::workspace_repo::{Collection, RepoError, RepoResult, WorkspaceStore};
pub use service::employee_service::{EmployeeService, EmployeeServiceError, NewEmployee};
pub use service::insight_service::{InsightService, InsightServiceError};
pub use service::task_service::{NewTask, ResolvedSuggestion, TaskService, TaskServiceError};
pub use service::workspace_service::{WorkspaceError, WorkspaceResult, WorkspaceService};
