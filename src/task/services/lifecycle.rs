//! Service layer for task creation, status changes, and conflict screening.

use crate::task::{
    domain::{
        ActiveEnvironmentSummary, BranchName, ConcurrencyConflict, ConflictCheck,
        EnvironmentConfig, NewTaskData, ParseTaskStatusError, StatusHistoryEntry, Task,
        TaskCandidate, TaskDomainError, TaskId, TaskStatus, active_environments,
        detect_concurrent_tasks, validate_transition,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{ConflictPolicy, LifecycleConfig};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    environment_config: EnvironmentConfig,
    branch_name: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, environment_config: EnvironmentConfig) -> Self {
        Self {
            title: title.into(),
            environment_config,
            branch_name: None,
        }
    }

    /// Sets the task-level branch.
    #[must_use]
    pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }
}

/// Request payload for changing a task's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
    message: Option<String>,
}

impl TransitionTaskRequest {
    /// Creates a transition request from an unparsed target status.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
            message: None,
        }
    }

    /// Sets the message recorded in the status history.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A newly stored task and any conflict it was created alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    /// The stored task, in `pending`.
    pub task: Task,
    /// Conflict reported under [`ConflictPolicy::Warn`].
    pub conflict: Option<ConcurrencyConflict>,
}

/// A task after a status change and any conflict the change proceeded past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionedTask {
    /// The updated task.
    pub task: Task,
    /// Conflict reported under [`ConflictPolicy::Warn`] when resuming or
    /// starting the task.
    pub conflict: Option<ConcurrencyConflict>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The requested status string is not a known status.
    #[error(transparent)]
    InvalidState(ParseTaskStatusError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The operation collides with an occupying task under
    /// [`ConflictPolicy::Block`].
    #[error("{0}")]
    Conflict(ConcurrencyConflict),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: LifecycleConfig,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: LifecycleConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> LifecycleConfig {
        self.config
    }

    async fn find_task_or_error(&self, task_id: &TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskLifecycleError::NotFound(task_id.clone()))
    }

    /// Creates a pending task.
    ///
    /// The candidate is screened against running and paused tasks first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank,
    /// [`TaskLifecycleError::Conflict`] when the configuration blocks on
    /// conflicts and one is found, or a repository error.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<CreatedTask> {
        let branch_name = BranchName::parse_optional(request.branch_name.as_deref());
        self.create(NewTaskData {
            title: request.title,
            environment_config: request.environment_config,
            branch_name,
            parent_task_id: None,
        })
        .await
    }

    /// Creates a pending copy of an existing task linked to it as parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the source task does not
    /// exist, [`TaskLifecycleError::Conflict`] when blocked by a conflict, or
    /// a repository error.
    pub async fn rerun_task(&self, task_id: &TaskId) -> TaskLifecycleResult<CreatedTask> {
        let source = self.find_task_or_error(task_id).await?;
        self.create(NewTaskData {
            title: source.title().to_owned(),
            environment_config: source.environment_config().clone(),
            branch_name: source.branch_name().cloned(),
            parent_task_id: Some(source.id().clone()),
        })
        .await
    }

    async fn create(&self, data: NewTaskData) -> TaskLifecycleResult<CreatedTask> {
        let task = Task::new(data, &*self.clock)?;
        let conflict = self.screen(&TaskCandidate::from(&task), None).await?;

        let entry = StatusHistoryEntry::for_task(&task, "Task created", &*self.clock);
        self.repository.store_with_history(&task, &entry).await?;

        info!(
            task_id = %task.id(),
            environment = %task.environment_config().kind(),
            parent_task_id = ?task.parent_task_id().map(TaskId::as_str),
            "task created"
        );
        Ok(CreatedTask { task, conflict })
    }

    /// Moves a task to a new status.
    ///
    /// Entering `running` screens the task against other running and paused
    /// tasks. The new status and its history entry are written together, so
    /// any error leaves the stored task and its history unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidState`] for an unknown status
    /// string, [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] for a transition the state machine
    /// rejects, [`TaskLifecycleError::Conflict`] when blocked by a conflict,
    /// or a repository error.
    pub async fn transition_task(
        &self,
        request: TransitionTaskRequest,
    ) -> TaskLifecycleResult<TransitionedTask> {
        let target = TaskStatus::try_from(request.target_status.as_str())
            .map_err(TaskLifecycleError::InvalidState)?;
        let mut task = self.find_task_or_error(&request.task_id).await?;
        let from = task.status();

        if let Err(err) = validate_transition(from, target) {
            warn!(task_id = %task.id(), %from, to = %target, "rejected status transition");
            return Err(err.into());
        }

        let conflict = if target == TaskStatus::Running {
            self.screen(&TaskCandidate::from(&task), Some(task.id()))
                .await?
        } else {
            None
        };

        task.transition_to(target, &*self.clock)?;
        let message = request
            .message
            .unwrap_or_else(|| format!("Status changed to {target}"));
        let entry = StatusHistoryEntry::for_task(&task, message, &*self.clock);
        self.repository.update_with_history(&task, &entry).await?;

        info!(task_id = %task.id(), %from, to = %target, "task status changed");
        Ok(TransitionedTask { task, conflict })
    }

    /// Runs conflict detection for a candidate without applying any policy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when loading occupying
    /// tasks fails.
    pub async fn check_conflicts(
        &self,
        candidate: &TaskCandidate,
    ) -> TaskLifecycleResult<ConflictCheck> {
        let occupying = self
            .repository
            .find_by_statuses(&TaskStatus::OCCUPYING)
            .await?;
        Ok(detect_concurrent_tasks(candidate, &occupying))
    }

    /// Applies the configured conflict policy to a candidate.
    ///
    /// `exclude` removes the task being activated from its own screening.
    async fn screen(
        &self,
        candidate: &TaskCandidate,
        exclude: Option<&TaskId>,
    ) -> TaskLifecycleResult<Option<ConcurrencyConflict>> {
        let occupying: Vec<Task> = self
            .repository
            .find_by_statuses(&TaskStatus::OCCUPYING)
            .await?
            .into_iter()
            .filter(|task| Some(task.id()) != exclude)
            .collect();

        let Some(conflict) = detect_concurrent_tasks(candidate, &occupying).into_conflict() else {
            debug!(
                environment = %candidate.environment_config.identity_key(),
                "no concurrent task conflict"
            );
            return Ok(None);
        };

        match self.config.conflict_policy {
            ConflictPolicy::Block => {
                warn!(
                    conflicts = conflict.conflicting_tasks().len(),
                    "blocked by concurrent task conflict"
                );
                Err(TaskLifecycleError::Conflict(conflict))
            }
            ConflictPolicy::Warn => {
                warn!(
                    conflicts = conflict.conflicting_tasks().len(),
                    detail = conflict.message(),
                    "proceeding despite concurrent task conflict"
                );
                Ok(Some(conflict))
            }
        }
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, task_id: &TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns a task's status history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn history(&self, task_id: &TaskId) -> TaskLifecycleResult<Vec<StatusHistoryEntry>> {
        Ok(self.repository.history_for(task_id).await?)
    }

    /// Summarises which environments and branches are currently occupied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when loading tasks fails.
    pub async fn active_environments(
        &self,
    ) -> TaskLifecycleResult<Vec<ActiveEnvironmentSummary>> {
        let occupying = self
            .repository
            .find_by_statuses(&TaskStatus::OCCUPYING)
            .await?;
        Ok(active_environments(&occupying))
    }
}
