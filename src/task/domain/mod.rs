//! Domain model for task lifecycle management.
//!
//! The task domain models the status state machine, execution environments,
//! and concurrent-task conflict detection. Everything here is pure and
//! synchronous; storage and presentation stay outside the domain boundary.

mod branch;
mod conflict;
mod environment;
mod error;
mod ids;
mod status;
mod task;
mod transition;

pub use branch::BranchName;
pub use conflict::{
    ActiveEnvironmentSummary, ConcurrencyConflict, ConflictCheck, TaskCandidate,
    active_environments, detect_concurrent_tasks,
};
pub use environment::{
    DEFAULT_REMOTE_PORT, EnvironmentConfig, EnvironmentKind, RemoteConnectionType,
};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, StatusHistoryEntry, Task};
pub use transition::{
    TransitionAction, available_actions, is_terminal_status, is_valid_transition,
    transition_label, validate_transition, valid_next_states,
};
