//! Shared world state for concurrent task conflict BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use worktrack::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::EnvironmentConfig,
    services::{
        CreateTaskRequest, CreatedTask, LifecycleConfig, TaskLifecycleError, TaskLifecycleService,
        TransitionTaskRequest,
    },
};

/// Scenario world for conflict detection behaviour tests.
pub struct ConflictWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub config: LifecycleConfig,
    pub last_creation_result: Option<Result<CreatedTask, TaskLifecycleError>>,
}

impl ConflictWorld {
    /// Creates a world with an empty repository and the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryTaskRepository::new()),
            config: LifecycleConfig::default(),
            last_creation_result: None,
        }
    }

    /// Builds a service over the shared repository with the current policy.
    #[must_use]
    pub fn service(&self) -> TaskLifecycleService<InMemoryTaskRepository, DefaultClock> {
        TaskLifecycleService::new(Arc::clone(&self.repository), Arc::new(DefaultClock))
            .with_config(self.config)
    }

    /// Creates a task in `environment` and starts it.
    pub fn start_task(
        &self,
        environment: EnvironmentConfig,
        branch_name: Option<String>,
    ) -> Result<(), eyre::Report> {
        let service = self.service();
        let mut request = CreateTaskRequest::new("Existing task", environment);
        if let Some(branch) = branch_name {
            request = request.with_branch_name(branch);
        }

        run_async(async {
            let created = service.create_task(request).await?;
            service
                .transition_task(TransitionTaskRequest::new(
                    created.task.id().clone(),
                    "running",
                ))
                .await?;
            Ok::<_, TaskLifecycleError>(())
        })?;
        Ok(())
    }

    /// Creates a task in `environment` and records the outcome.
    pub fn create_task(&mut self, environment: EnvironmentConfig) {
        let service = self.service();
        let request = CreateTaskRequest::new("New task", environment);
        let result = run_async(service.create_task(request));
        self.last_creation_result = Some(result);
    }
}

impl Default for ConflictWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ConflictWorld {
    ConflictWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
