//! Error types for task domain validation and parsing.

use super::TaskStatus;
use std::borrow::Borrow;
use thiserror::Error;

/// Errors returned while constructing domain task values or changing status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The branch name is empty or only whitespace.
    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    /// The requested status is not reachable from the current status.
    #[error(
        "invalid status transition from {from} to {to}; valid transitions: {}",
        describe_valid_next_states(.from)
    )]
    InvalidStatusTransition {
        /// Current task status.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },
}

/// Renders the legal successors of `from` for error messages.
fn describe_valid_next_states(from: impl Borrow<TaskStatus>) -> String {
    let next = from.borrow().valid_next_states();
    if next.is_empty() {
        return "none".to_owned();
    }
    next.iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
