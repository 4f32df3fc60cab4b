//! Then steps for task partition BDD scenarios.

use super::world::TaskPartitionWorld;
use rstest_bdd_macros::then;
use tickbox::api::ApiResponse;

#[then(r#"the "{status}" partition is empty"#)]
fn partition_is_empty(world: &TaskPartitionWorld, status: String) -> Result<(), eyre::Report> {
    let tasks = world.partition(&status)?;
    if !tasks.is_empty() {
        return Err(eyre::eyre!("expected {status} to be empty, found {tasks:?}"));
    }
    Ok(())
}

#[then(r#"the "{status}" partition contains "{text}""#)]
fn partition_contains(
    world: &TaskPartitionWorld,
    status: String,
    text: String,
) -> Result<(), eyre::Report> {
    let tasks = world.partition(&status)?;
    let found = tasks
        .iter()
        .any(|task| task.text == text && task.status == status);
    if !found {
        return Err(eyre::eyre!("expected {text:?} in {status}, found {tasks:?}"));
    }
    Ok(())
}

#[then(r#"the operation fails with a "{kind}" error"#)]
fn operation_fails_with(world: &TaskPartitionWorld, kind: String) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation response"))?;
    let ApiResponse::Errors(errors) = response else {
        return Err(eyre::eyre!("expected an error response, got {response:?}"));
    };
    let first = errors
        .first()
        .ok_or_else(|| eyre::eyre!("error response carried no errors"))?;
    let actual = serde_json::to_value(first.kind)?;
    if actual != serde_json::Value::String(kind.clone()) {
        return Err(eyre::eyre!("expected {kind} error, got {actual}"));
    }
    Ok(())
}
