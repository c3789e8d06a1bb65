//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{StatusHistoryEntry, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    creation_order: Vec<TaskId>,
    history: HashMap<TaskId, Vec<StatusHistoryEntry>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn ensure_same_task(task: &Task, entry: &StatusHistoryEntry) -> TaskRepositoryResult<()> {
    if entry.task_id() == task.id() {
        return Ok(());
    }
    Err(TaskRepositoryError::HistoryMismatch {
        task: task.id().clone(),
        entry: entry.task_id().clone(),
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store_with_history(
        &self,
        task: &Task,
        entry: &StatusHistoryEntry,
    ) -> TaskRepositoryResult<()> {
        ensure_same_task(task, entry)?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id().clone()));
        }

        state.creation_order.push(task.id().clone());
        state.tasks.insert(task.id().clone(), task.clone());
        state.history.insert(task.id().clone(), vec![entry.clone()]);
        Ok(())
    }

    async fn update_with_history(
        &self,
        task: &Task,
        entry: &StatusHistoryEntry,
    ) -> TaskRepositoryResult<()> {
        ensure_same_task(task, entry)?;
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get_mut(task.id())
            .ok_or_else(|| TaskRepositoryError::NotFound(task.id().clone()))?;
        *stored = task.clone();
        state
            .history
            .entry(task.id().clone())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(id).cloned())
    }

    async fn find_by_statuses(
        &self,
        statuses: &[TaskStatus],
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let tasks = state
            .creation_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| statuses.contains(&task.status()))
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn history_for(&self, id: &TaskId) -> TaskRepositoryResult<Vec<StatusHistoryEntry>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.history.get(id).cloned().unwrap_or_default())
    }
}
