//! Given steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use worktrack::task::{
    domain::EnvironmentConfig,
    services::{CreateTaskRequest, TransitionTaskRequest},
};

#[given("a pending local task")]
fn pending_local_task(world: &mut TaskTransitionWorld) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_task(CreateTaskRequest::new(
        "Implement login form",
        EnvironmentConfig::Local,
    )))
    .wrap_err("create task for transition scenario")?;
    world.record_task(created.task);
    Ok(())
}

#[given(r#"the task has been transitioned to "{target_status}""#)]
fn task_has_been_transitioned(
    world: &mut TaskTransitionWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let task_id = world
        .current_task
        .as_ref()
        .map(|task| task.id().clone())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let transitioned = run_async(
        world
            .service
            .transition_task(TransitionTaskRequest::new(task_id, target_status)),
    )
    .wrap_err("transition task in scenario setup")?;

    world.record_task(transitioned.task);
    Ok(())
}
