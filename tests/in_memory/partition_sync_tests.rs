//! After every successful mutation, a synced client's snapshot matches what
//! a freshly loaded client sees.

use std::sync::Arc;

use rstest::rstest;
use tickbox::sync::{ClientError, SyncedTaskClient};
use tickbox::task::domain::TaskStatus;

use super::helpers::{MemoryTaskApi, api};

async fn assert_matches_fresh_load(
    api: &Arc<MemoryTaskApi>,
    client: &SyncedTaskClient<MemoryTaskApi>,
) -> Result<(), ClientError> {
    let mut fresh = SyncedTaskClient::new(Arc::clone(api));
    fresh.load().await?;
    assert_eq!(client.snapshot(), fresh.snapshot());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshot_tracks_server_through_mixed_mutations(
    api: Arc<MemoryTaskApi>,
) -> Result<(), ClientError> {
    let mut client = SyncedTaskClient::new(Arc::clone(&api));
    client.load().await?;

    let milk = client.add_task("buy milk").await?;
    assert_matches_fresh_load(&api, &client).await?;
    let dog = client.add_task("walk dog").await?;
    assert_matches_fresh_load(&api, &client).await?;

    client.toggle_complete(&milk.id).await?;
    assert_matches_fresh_load(&api, &client).await?;

    client.edit_text(&dog.id, "walk the dog").await?;
    assert_matches_fresh_load(&api, &client).await?;

    client.delete_task(&milk.id).await?;
    assert_matches_fresh_load(&api, &client).await?;

    client
        .update_task(&milk.id, None, Some(TaskStatus::Active))
        .await?;
    assert_matches_fresh_load(&api, &client).await?;

    let active: Vec<&str> = client
        .snapshot()
        .partition(TaskStatus::Active)
        .iter()
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(active, vec!["buy milk", "walk the dog"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_task_appears_in_exactly_one_partition(
    api: Arc<MemoryTaskApi>,
) -> Result<(), ClientError> {
    let mut client = SyncedTaskClient::new(Arc::clone(&api));
    let mut ids = Vec::new();
    for text in ["a", "b", "c", "d"] {
        ids.push(client.add_task(text).await?.id);
    }
    if let [a, b, c, _] = ids.as_slice() {
        client.toggle_complete(a).await?;
        client.delete_task(b).await?;
        client.toggle_complete(c).await?;
        client.delete_task(c).await?;
    }

    for id in &ids {
        let holders = TaskStatus::ALL
            .into_iter()
            .filter(|status| {
                client
                    .snapshot()
                    .partition(*status)
                    .iter()
                    .any(|task| &task.id == id)
            })
            .count();
        assert_eq!(holders, 1, "task {id} should be in one partition");
    }
    Ok(())
}
