//! Repository port for task persistence, lookup, and status history.

use crate::task::domain::{StatusHistoryEntry, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its first history entry.
    ///
    /// Either both are persisted or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists, or [`TaskRepositoryError::HistoryMismatch`] when `entry` belongs
    /// to another task.
    async fn store_with_history(
        &self,
        task: &Task,
        entry: &StatusHistoryEntry,
    ) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status and timestamps) and
    /// appends the history entry describing them.
    ///
    /// Either both are persisted or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist,
    /// or [`TaskRepositoryError::HistoryMismatch`] when `entry` belongs to
    /// another task.
    async fn update_with_history(
        &self,
        task: &Task,
        entry: &StatusHistoryEntry,
    ) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks whose status is one of `statuses`, in creation order.
    async fn find_by_statuses(
        &self,
        statuses: &[TaskStatus],
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the status history of a task, oldest first.
    async fn history_for(&self, id: &TaskId) -> TaskRepositoryResult<Vec<StatusHistoryEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A history entry was paired with a different task.
    #[error("history entry for task {entry} cannot be recorded against task {task}")]
    HistoryMismatch {
        /// Task being written.
        task: TaskId,
        /// Task the history entry refers to.
        entry: TaskId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
