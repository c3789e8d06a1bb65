//! Application services for task lifecycle orchestration.

mod config;
mod lifecycle;

pub use config::{ConflictPolicy, LifecycleConfig};
pub use lifecycle::{
    CreateTaskRequest, CreatedTask, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    TransitionTaskRequest, TransitionedTask,
};
