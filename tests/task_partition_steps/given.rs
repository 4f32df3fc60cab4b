//! Given steps for task partition BDD scenarios.

use super::world::{TaskPartitionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task "{text}" has been added"#)]
fn task_has_been_added(world: &mut TaskPartitionWorld, text: String) -> Result<(), eyre::Report> {
    let task = run_async(world.api.add_task(text)).wrap_err("add task in scenario setup")?;
    world.last_task = Some(task);
    Ok(())
}

#[given(r#"the task has been marked "{status}""#)]
fn task_has_been_marked(
    world: &mut TaskPartitionWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.current_task()?.id.clone();
    let updated = run_async(world.api.update_task(&id, None, Some(&status)))
        .wrap_err("update task status in scenario setup")?;
    world.last_task = Some(updated);
    Ok(())
}
