//! Concurrent-task conflict detection and environment occupancy reporting.
//!
//! A running or paused task occupies its environment and branch. A candidate
//! conflicts with an occupying task when both the environment identity and
//! the branch match. Detection is advisory: it reports conflicts and leaves
//! the decision to block or warn with the caller.

use super::{BranchName, EnvironmentConfig, EnvironmentKind, Task};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

const CONCURRENCY_ADVISORY: &str = "Running multiple tasks concurrently in the same environment \
     and branch may cause file conflicts or unexpected behavior.";

/// Environment and branch of a task about to be created or activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCandidate {
    /// Where the task would execute.
    pub environment_config: EnvironmentConfig,
    /// Task-level branch, if any.
    pub branch_name: Option<BranchName>,
}

impl TaskCandidate {
    /// Creates a candidate.
    #[must_use]
    pub const fn new(
        environment_config: EnvironmentConfig,
        branch_name: Option<BranchName>,
    ) -> Self {
        Self {
            environment_config,
            branch_name,
        }
    }

    /// Returns whether `task` holds the same environment and branch.
    fn collides_with(&self, task: &Task) -> bool {
        self.environment_config
            .is_same_environment(task.environment_config())
            && self.branch_name.as_ref() == task.branch_name()
    }
}

impl From<&Task> for TaskCandidate {
    fn from(task: &Task) -> Self {
        Self::new(task.environment_config().clone(), task.branch_name().cloned())
    }
}

/// Occupying tasks that collide with a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcurrencyConflict {
    conflicting_tasks: Vec<Task>,
    message: String,
}

impl ConcurrencyConflict {
    /// Returns the colliding tasks, in input order.
    #[must_use]
    pub fn conflicting_tasks(&self) -> &[Task] {
        &self.conflicting_tasks
    }

    /// Returns the user-facing warning.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConcurrencyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictCheck {
    /// No occupying task collides with the candidate.
    Clear,
    /// At least one occupying task collides with the candidate.
    Conflict(ConcurrencyConflict),
}

impl ConflictCheck {
    /// Returns whether a conflict was found.
    #[must_use]
    pub const fn has_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Returns the conflict details, if any.
    #[must_use]
    pub const fn conflict(&self) -> Option<&ConcurrencyConflict> {
        match self {
            Self::Clear => None,
            Self::Conflict(conflict) => Some(conflict),
        }
    }

    /// Consumes the check, returning the conflict details, if any.
    #[must_use]
    pub fn into_conflict(self) -> Option<ConcurrencyConflict> {
        match self {
            Self::Clear => None,
            Self::Conflict(conflict) => Some(conflict),
        }
    }
}

/// Checks whether `candidate` would collide with an occupying task.
///
/// Only `running` and `paused` tasks are considered; every other status is
/// ignored.
#[must_use]
pub fn detect_concurrent_tasks(
    candidate: &TaskCandidate,
    existing_tasks: &[Task],
) -> ConflictCheck {
    let conflicting_tasks: Vec<Task> = existing_tasks
        .iter()
        .filter(|task| task.status().is_occupying() && candidate.collides_with(task))
        .cloned()
        .collect();

    if conflicting_tasks.is_empty() {
        return ConflictCheck::Clear;
    }

    let message = conflict_message(candidate, conflicting_tasks.len());
    ConflictCheck::Conflict(ConcurrencyConflict {
        conflicting_tasks,
        message,
    })
}

fn conflict_message(candidate: &TaskCandidate, count: usize) -> String {
    let tasks = if count == 1 {
        "1 task is".to_owned()
    } else {
        format!("{count} tasks are")
    };
    let place = match candidate.environment_config.kind() {
        EnvironmentKind::Worktree => "in the same worktree",
        EnvironmentKind::Remote => "on the same remote host",
        EnvironmentKind::Local | EnvironmentKind::Unrecognized => "in the same environment",
    };
    let branch = candidate
        .branch_name
        .as_ref()
        .map_or_else(|| "default branch".to_owned(), ToString::to_string);

    format!("{tasks} already running {place} on {branch}. {CONCURRENCY_ADVISORY}")
}

/// Occupancy count for one environment and branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEnvironmentSummary {
    /// Kind of the occupied environment.
    pub environment_type: EnvironmentKind,
    /// Identity key of the environment, see
    /// [`EnvironmentConfig::identity_key`].
    pub environment_key: String,
    /// Occupied branch, `None` for the default branch.
    pub branch_name: Option<BranchName>,
    /// Number of running or paused tasks holding this slot.
    pub task_count: usize,
}

/// Groups running and paused tasks by environment and branch.
///
/// Entries appear in the order their first task appears in `tasks`.
#[must_use]
pub fn active_environments(tasks: &[Task]) -> Vec<ActiveEnvironmentSummary> {
    let mut summaries: Vec<ActiveEnvironmentSummary> = Vec::new();
    let mut positions: HashMap<(String, Option<BranchName>), usize> = HashMap::new();

    for task in tasks.iter().filter(|task| task.status().is_occupying()) {
        let environment_key = task.environment_config().identity_key();
        let branch_name = task.branch_name().cloned();
        let slot = (environment_key.clone(), branch_name.clone());

        if let Some(summary) = positions
            .get(&slot)
            .and_then(|&position| summaries.get_mut(position))
        {
            summary.task_count += 1;
            continue;
        }

        positions.insert(slot, summaries.len());
        summaries.push(ActiveEnvironmentSummary {
            environment_type: task.environment_config().kind(),
            environment_key,
            branch_name,
            task_count: 1,
        });
    }

    summaries
}
