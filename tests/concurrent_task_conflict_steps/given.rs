//! Given steps for concurrent task conflict BDD scenarios.

use super::world::ConflictWorld;
use rstest_bdd_macros::given;
use worktrack::task::{domain::EnvironmentConfig, services::LifecycleConfig};

#[given("conflicts block task creation")]
fn conflicts_block(world: &mut ConflictWorld) {
    world.config = LifecycleConfig::blocking();
}

#[given(r#"a running task in worktree "{path}" with no branch"#)]
fn running_worktree_task(world: &mut ConflictWorld, path: String) -> Result<(), eyre::Report> {
    world.start_task(EnvironmentConfig::worktree(path), None)
}

#[given(r#"a running task in worktree "{path}" on branch "{branch}""#)]
fn running_worktree_task_on_branch(
    world: &mut ConflictWorld,
    path: String,
    branch: String,
) -> Result<(), eyre::Report> {
    world.start_task(EnvironmentConfig::worktree(path), Some(branch))
}

#[given(r#"a running task on remote host "{host}" port {port:u16}"#)]
fn running_remote_task(
    world: &mut ConflictWorld,
    host: String,
    port: u16,
) -> Result<(), eyre::Report> {
    world.start_task(EnvironmentConfig::ssh(host, Some(port)), None)
}
