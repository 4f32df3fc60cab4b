//! When steps for task partition BDD scenarios.

use super::world::{TaskPartitionWorld, run_async};
use rstest_bdd_macros::when;
use tickbox::api::{ApiRequest, ApiResponse, OperationResult};

fn record(world: &mut TaskPartitionWorld, response: ApiResponse) {
    if let ApiResponse::Data(
        OperationResult::AddTask(ref task) | OperationResult::UpdateTask(ref task),
    ) = response
    {
        world.last_task = Some(task.clone());
    }
    world.last_response = Some(response);
}

#[when(r#"the task is marked "{status}""#)]
fn task_is_marked(world: &mut TaskPartitionWorld, status: String) -> Result<(), eyre::Report> {
    let id = world.current_task()?.id.clone();
    let response = run_async(world.api.execute(ApiRequest::UpdateTask {
        id,
        text: None,
        status: Some(status),
    }));
    record(world, response);
    Ok(())
}

#[when("the task is deleted")]
fn task_is_deleted(world: &mut TaskPartitionWorld) -> Result<(), eyre::Report> {
    let id = world.current_task()?.id.clone();
    let response = run_async(world.api.execute(ApiRequest::DeleteTask { id }));
    record(world, response);
    Ok(())
}

#[when("a blank task is added")]
fn blank_task_is_added(world: &mut TaskPartitionWorld) {
    let response = run_async(world.api.execute(ApiRequest::AddTask {
        text: "   ".to_owned(),
    }));
    record(world, response);
}

#[when(r#"an unknown task is marked "{status}""#)]
fn unknown_task_is_marked(world: &mut TaskPartitionWorld, status: String) {
    let response = run_async(world.api.execute(ApiRequest::UpdateTask {
        id: uuid::Uuid::new_v4().to_string(),
        text: None,
        status: Some(status),
    }));
    record(world, response);
}
