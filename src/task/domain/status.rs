//! Task status and the lifecycle transition table.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but has not started.
    Pending,
    /// Task is executing in its environment.
    Running,
    /// Task finished successfully.
    Completed,
    /// Task finished unsuccessfully.
    Failed,
    /// Task execution is suspended and may resume.
    Paused,
    /// Connection to the task's environment was lost.
    Disconnected,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Running,
        Self::Completed,
        Self::Failed,
        Self::Paused,
        Self::Disconnected,
    ];

    /// Statuses that hold an environment for conflict detection.
    ///
    /// `Disconnected` is not included: a disconnected task does not block a
    /// new task in the same environment and branch.
    pub const OCCUPYING: [Self; 2] = [Self::Running, Self::Paused];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Paused => "paused",
            Self::Disconnected => "disconnected",
        }
    }

    /// Returns the statuses reachable from this status in one transition.
    ///
    /// The slice is empty for terminal statuses.
    #[must_use]
    pub const fn valid_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Running],
            Self::Running => &[
                Self::Completed,
                Self::Failed,
                Self::Paused,
                Self::Disconnected,
            ],
            Self::Paused => &[Self::Running],
            Self::Disconnected => &[Self::Running, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        target.is_listed_in(self.valid_next_states())
    }

    /// Returns whether this status has no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.valid_next_states().is_empty()
    }

    /// Returns whether a task in this status occupies its environment.
    #[must_use]
    pub const fn is_occupying(self) -> bool {
        self.is_listed_in(&Self::OCCUPYING)
    }

    const fn is_listed_in(self, statuses: &[Self]) -> bool {
        let mut remaining = statuses;
        while let [head, tail @ ..] = remaining {
            if *head as u8 == self as u8 {
                return true;
            }
            remaining = tail;
        }
        false
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "paused" => Ok(Self::Paused),
            "disconnected" => Ok(Self::Disconnected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
