//! `PostgreSQL` integration tests for task creation, partitions, and updates.

use chrono::{Duration, Utc};
use rstest::rstest;
use tickbox::task::{
    domain::{TaskId, TaskPatch, TaskStatus, TaskText},
    ports::{TaskRepository, TaskRepositoryError},
    services::{ErrorKind, UpdateTaskRequest},
};

use crate::postgres::helpers::{BoxError, setup_store};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TICKBOX_TEST_DATABASE_URL"]
async fn postgres_add_and_list_partitions() -> Result<(), BoxError> {
    let ctx = setup_store().await?;

    let milk = ctx.service.add("  buy milk ").await?;
    let dog = ctx.service.add("walk dog").await?;

    assert_eq!(milk.text().as_str(), "buy milk");
    assert_eq!(milk.status(), TaskStatus::Active);
    let active: Vec<TaskId> = ctx
        .service
        .list_active()
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    assert_eq!(active, vec![milk.id(), dog.id()]);
    assert!(ctx.service.list_completed().await?.is_empty());
    assert!(ctx.service.list_deleted().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TICKBOX_TEST_DATABASE_URL"]
async fn postgres_status_changes_move_tasks() -> Result<(), BoxError> {
    let ctx = setup_store().await?;
    let task = ctx.service.add("file taxes").await?;

    let completed = ctx
        .service
        .update(UpdateTaskRequest::new(task.id()).with_status(TaskStatus::Completed))
        .await?;
    assert_eq!(ctx.service.list_completed().await?, vec![completed]);
    assert!(ctx.service.list_active().await?.is_empty());

    assert!(ctx.service.soft_delete(task.id()).await?);
    let deleted = ctx.service.list_deleted().await?;
    assert_eq!(deleted.len(), 1);
    assert!(deleted.iter().all(|t| t.id() == task.id() && t.text() == task.text()));
    assert!(ctx.service.list_completed().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TICKBOX_TEST_DATABASE_URL"]
async fn postgres_update_keeps_creation_order_and_stamps_time() -> Result<(), BoxError> {
    let ctx = setup_store().await?;
    let created_at = Utc::now();
    let text = |value: &str| TaskText::new(value);
    let first = ctx.repository.create(text("first")?, created_at).await?;
    let second = ctx.repository.create(text("second")?, created_at).await?;

    let later = created_at + Duration::minutes(5);
    let edited = ctx
        .repository
        .update_by_id(first.id(), &TaskPatch::new().with_text(text("first, edited")?), later)
        .await?;

    assert_eq!(edited.text().as_str(), "first, edited");
    assert_eq!(edited.updated_at().timestamp_micros(), later.timestamp_micros());
    let ids: Vec<TaskId> = ctx
        .repository
        .find_by_status(TaskStatus::Active)
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TICKBOX_TEST_DATABASE_URL"]
async fn postgres_unknown_ids_are_not_found() -> Result<(), BoxError> {
    let ctx = setup_store().await?;
    let missing = TaskId::new();

    let lookup = ctx.repository.find_by_id(missing).await?;
    assert!(lookup.is_none());

    let patch = TaskPatch::new().with_status(TaskStatus::Completed);
    let result = ctx.repository.update_by_id(missing, &patch, Utc::now()).await;
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == missing));

    let err = ctx
        .service
        .soft_delete(missing)
        .await
        .err()
        .ok_or("delete of unknown task should fail")?;
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TICKBOX_TEST_DATABASE_URL"]
async fn postgres_blank_text_is_rejected_before_storage() -> Result<(), BoxError> {
    let ctx = setup_store().await?;

    let err = ctx
        .service
        .add("   ")
        .await
        .err()
        .ok_or("blank text should be rejected")?;

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(ctx.service.list_active().await?.is_empty());
    Ok(())
}
