//! Free-function view of the status transition engine.
//!
//! These wrap the [`TaskStatus`] transition table for callers that validate a
//! status change before persisting it, and add presentation labels for the
//! legal edges.

use super::{TaskDomainError, TaskStatus};
use serde::Serialize;

/// Returns whether `to` is reachable from `from` in one transition.
#[must_use]
pub const fn is_valid_transition(from: TaskStatus, to: TaskStatus) -> bool {
    from.can_transition_to(to)
}

/// Returns the statuses reachable from `from`, empty for terminal statuses.
#[must_use]
pub const fn valid_next_states(from: TaskStatus) -> &'static [TaskStatus] {
    from.valid_next_states()
}

/// Returns whether `status` has no outgoing transitions.
#[must_use]
pub const fn is_terminal_status(status: TaskStatus) -> bool {
    status.is_terminal()
}

/// Checks a requested status change.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidStatusTransition`] when `to` is not
/// reachable from `from`. The error message lists the legal alternatives, or
/// `none` when `from` is terminal.
pub const fn validate_transition(from: TaskStatus, to: TaskStatus) -> Result<(), TaskDomainError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(TaskDomainError::InvalidStatusTransition { from, to })
    }
}

/// Returns the short imperative label for a status change.
///
/// Pairs without a label fall back to the target status name.
#[must_use]
pub const fn transition_label(from: TaskStatus, to: TaskStatus) -> &'static str {
    match (from, to) {
        (TaskStatus::Pending, TaskStatus::Running) => "Start",
        (TaskStatus::Running, TaskStatus::Paused) => "Pause",
        (TaskStatus::Paused | TaskStatus::Disconnected, TaskStatus::Running) => "Resume",
        (TaskStatus::Disconnected, TaskStatus::Failed) => "Mark Failed",
        (TaskStatus::Running, TaskStatus::Completed) => "Complete",
        (TaskStatus::Running, TaskStatus::Failed) => "Fail",
        (TaskStatus::Running, TaskStatus::Disconnected) => "Mark Disconnected",
        _ => to.as_str(),
    }
}

/// A legal next status paired with its presentation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionAction {
    /// Status the action moves the task to.
    pub target: TaskStatus,
    /// Short imperative label for the action.
    pub label: &'static str,
}

/// Lists the actions available from `from`, in transition-table order.
#[must_use]
pub fn available_actions(from: TaskStatus) -> Vec<TransitionAction> {
    from.valid_next_states()
        .iter()
        .map(|&target| TransitionAction {
            target,
            label: transition_label(from, target),
        })
        .collect()
}
