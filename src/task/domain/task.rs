//! Task aggregate root and status history records.

use super::{
    BranchName, EnvironmentConfig, TaskDomainError, TaskId, TaskStatus, validate_transition,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    environment_config: EnvironmentConfig,
    branch_name: Option<BranchName>,
    parent_task_id: Option<TaskId>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Human-readable task title.
    pub title: String,
    /// Where the task will execute.
    pub environment_config: EnvironmentConfig,
    /// Task-level git branch, if any.
    pub branch_name: Option<BranchName>,
    /// Task this one was rerun from, if any.
    pub parent_task_id: Option<TaskId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted environment configuration.
    pub environment_config: EnvironmentConfig,
    /// Persisted branch name, if any.
    pub branch_name: Option<BranchName>,
    /// Persisted parent task identifier, if any.
    pub parent_task_id: Option<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted first-start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: title.to_owned(),
            status: TaskStatus::Pending,
            environment_config: data.environment_config,
            branch_name: data.branch_name,
            parent_task_id: data.parent_task_id,
            created_at: timestamp,
            started_at: None,
            completed_at: None,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            environment_config: data.environment_config,
            branch_name: data.branch_name,
            parent_task_id: data.parent_task_id,
            created_at: data.created_at,
            started_at: data.started_at,
            completed_at: data.completed_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the execution environment.
    #[must_use]
    pub const fn environment_config(&self) -> &EnvironmentConfig {
        &self.environment_config
    }

    /// Returns the task-level branch, if any.
    #[must_use]
    pub const fn branch_name(&self) -> Option<&BranchName> {
        self.branch_name.as_ref()
    }

    /// Returns the task this one was rerun from, if any.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<&TaskId> {
        self.parent_task_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the task first entered `running`.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task reached a terminal status.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target`.
    ///
    /// Records `started_at` on the first entry into `running` and
    /// `completed_at` on entry into a terminal status. Neither is cleared or
    /// overwritten afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the table
    /// does not allow the change. The task is left unmodified.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        validate_transition(self.status, target)?;

        let timestamp = clock.utc();
        if target == TaskStatus::Running && self.started_at.is_none() {
            self.started_at = Some(timestamp);
        }
        if target.is_terminal() && self.completed_at.is_none() {
            self.completed_at = Some(timestamp);
        }
        self.status = target;
        self.updated_at = timestamp;
        Ok(())
    }
}

/// Append-only record of a status a task entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    task_id: TaskId,
    status: TaskStatus,
    message: String,
    recorded_at: DateTime<Utc>,
}

impl StatusHistoryEntry {
    /// Records the current status of `task`.
    #[must_use]
    pub fn for_task(task: &Task, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            task_id: task.id().clone(),
            status: task.status(),
            message: message.into(),
            recorded_at: clock.utc(),
        }
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the status that was entered.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the message recorded with the change.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
