//! Then steps for task state transition BDD scenarios.

use super::world::TaskTransitionWorld;
use rstest_bdd_macros::then;
use worktrack::task::{
    domain::{Task, TaskDomainError, TaskStatus},
    services::{TaskLifecycleError, TransitionedTask},
};

fn current_task(world: &TaskTransitionWorld) -> Result<&Task, eyre::Report> {
    world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
}

fn last_result(
    world: &TaskTransitionWorld,
) -> Result<&Result<TransitionedTask, TaskLifecycleError>, eyre::Report> {
    world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = current_task(world)?;

    if task.status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            task.status().as_str()
        ));
    }

    Ok(())
}

#[then("the task has a start time")]
fn task_has_start_time(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        current_task(world)?.started_at().is_some(),
        "expected started_at to be set"
    );
    Ok(())
}

#[then("the start time is unchanged")]
fn start_time_is_unchanged(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let task = current_task(world)?;
    eyre::ensure!(world.first_started_at.is_some(), "task never started");
    eyre::ensure!(
        task.started_at() == world.first_started_at,
        "started_at changed from {:?} to {:?}",
        world.first_started_at,
        task.started_at()
    );
    Ok(())
}

#[then("the transition fails with an invalid status transition error")]
fn transition_fails_with_invalid_status_transition(
    world: &TaskTransitionWorld,
) -> Result<(), eyre::Report> {
    let result = last_result(world)?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {result:?}"
        ));
    }

    Ok(())
}

#[then(r#"the error lists "{alternatives}" as the valid transitions"#)]
fn error_lists_valid_transitions(
    world: &TaskTransitionWorld,
    alternatives: String,
) -> Result<(), eyre::Report> {
    let Err(err) = last_result(world)? else {
        return Err(eyre::eyre!("expected the transition to fail"));
    };
    let message = err.to_string();
    let expected_suffix = format!("valid transitions: {alternatives}");
    eyre::ensure!(
        message.ends_with(&expected_suffix),
        "unexpected error message: {message}"
    );
    Ok(())
}

#[then("the transition fails with an invalid status error")]
fn transition_fails_with_invalid_status_error(
    world: &TaskTransitionWorld,
) -> Result<(), eyre::Report> {
    let result = last_result(world)?;

    if !matches!(result, Err(TaskLifecycleError::InvalidState(_))) {
        return Err(eyre::eyre!("expected InvalidState error, got {result:?}"));
    }

    Ok(())
}
