//! In-memory integration tests for concurrent-task screening.

use super::helpers::{TestService, create_and_walk, service, worktree};
use rstest::rstest;
use worktrack::task::{
    domain::{BranchName, EnvironmentConfig, EnvironmentKind, TaskCandidate},
    services::{CreateTaskRequest, LifecycleConfig, TaskLifecycleError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_tasks_means_no_active_environments(service: TestService) -> Result<(), eyre::Report> {
    eyre::ensure!(service.active_environments().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn running_local_task_is_reported_but_never_conflicts(
    service: TestService,
) -> Result<(), eyre::Report> {
    create_and_walk(
        &service,
        CreateTaskRequest::new("Local job", EnvironmentConfig::Local),
        &["running"],
    )
    .await?;

    let summaries = service.active_environments().await?;
    let [summary] = summaries.as_slice() else {
        return Err(eyre::eyre!("expected one summary, got {summaries:?}"));
    };
    eyre::ensure!(summary.environment_type == EnvironmentKind::Local);
    eyre::ensure!(summary.environment_key == "local");
    eyre::ensure!(summary.task_count == 1);

    let check = service
        .check_conflicts(&TaskCandidate::new(EnvironmentConfig::Local, None))
        .await?;
    eyre::ensure!(!check.has_conflict());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_default_port_collides_with_explicit_port_22(
    service: TestService,
) -> Result<(), eyre::Report> {
    let service = service.with_config(LifecycleConfig::blocking());
    create_and_walk(
        &service,
        CreateTaskRequest::new("Remote job", EnvironmentConfig::ssh("x.com", Some(22))),
        &["running"],
    )
    .await?;

    let same_host = service
        .create_task(CreateTaskRequest::new(
            "Second remote job",
            EnvironmentConfig::ssh("x.com", None),
        ))
        .await;
    eyre::ensure!(matches!(same_host, Err(TaskLifecycleError::Conflict(_))));

    let other_port = service
        .create_task(CreateTaskRequest::new(
            "Other port job",
            EnvironmentConfig::ssh("x.com", Some(2222)),
        ))
        .await?;
    eyre::ensure!(other_port.conflict.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disconnected_task_does_not_occupy_its_slot(
    service: TestService,
) -> Result<(), eyre::Report> {
    let service = service.with_config(LifecycleConfig::blocking());
    create_and_walk(
        &service,
        CreateTaskRequest::new("Dropped job", worktree("/a")).with_branch_name("main"),
        &["running", "disconnected"],
    )
    .await?;

    let created = service
        .create_task(
            CreateTaskRequest::new("Replacement", worktree("/a")).with_branch_name("main"),
        )
        .await?;

    eyre::ensure!(created.conflict.is_none());
    eyre::ensure!(service.active_environments().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn warn_policy_counts_paused_and_running_tasks(
    service: TestService,
) -> Result<(), eyre::Report> {
    create_and_walk(
        &service,
        CreateTaskRequest::new("Paused job", worktree("/a")).with_branch_name("main"),
        &["running", "paused"],
    )
    .await?;
    create_and_walk(
        &service,
        CreateTaskRequest::new("Running job", worktree("/a")).with_branch_name("main"),
        &["running"],
    )
    .await?;

    let check = service
        .check_conflicts(&TaskCandidate::new(
            worktree("/a"),
            Some(BranchName::new("main")?),
        ))
        .await?;

    let conflict = check
        .conflict()
        .ok_or_else(|| eyre::eyre!("expected a conflict"))?;
    eyre::ensure!(conflict.conflicting_tasks().len() == 2);
    eyre::ensure!(
        conflict
            .message()
            .starts_with("2 tasks are already running in the same worktree on main.")
    );
    Ok(())
}
