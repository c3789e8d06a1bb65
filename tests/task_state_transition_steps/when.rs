//! When steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use rstest_bdd_macros::when;
use worktrack::task::services::TransitionTaskRequest;

#[when(r#"the task is transitioned to "{target_status}""#)]
fn transition_task(
    world: &mut TaskTransitionWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let task_id = world
        .current_task
        .as_ref()
        .map(|task| task.id().clone())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let result = run_async(
        world
            .service
            .transition_task(TransitionTaskRequest::new(task_id, target_status)),
    );
    if let Ok(ref updated) = result {
        world.record_task(updated.task.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}
