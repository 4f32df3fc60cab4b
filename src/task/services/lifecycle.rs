//! Service layer for task creation, partition queries, and updates.

use super::error::{TaskLifecycleError, TaskLifecycleResult};
use crate::task::{
    domain::{Task, TaskId, TaskPatch, TaskStatus, TaskText},
    ports::TaskRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for a partial task update.
///
/// Both fields are optional; a request with neither is a no-op. Text that
/// is empty after trimming is treated as not given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    text: Option<String>,
    status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            text: None,
            status: None,
        }
    }

    /// Sets the replacement text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the target task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Blank replacement text counts as absent.
    fn into_patch(self) -> TaskPatch {
        let mut patch = TaskPatch::new();
        if let Some(text) = self.text.and_then(|raw| TaskText::new(raw).ok()) {
            patch = patch.with_text(text);
        }
        if let Some(status) = self.status {
            patch = patch.with_status(status);
        }
        patch
    }
}

/// Task lifecycle service.
///
/// Statuses carry no transition guard: an update may move a task from any
/// status to any other, including out of `Deleted`.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists tasks with status `Active`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_active(&self) -> TaskLifecycleResult<Vec<Task>> {
        self.list_partition(TaskStatus::Active).await
    }

    /// Lists tasks with status `Completed`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_completed(&self) -> TaskLifecycleResult<Vec<Task>> {
        self.list_partition(TaskStatus::Completed).await
    }

    /// Lists tasks with status `Deleted`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_deleted(&self) -> TaskLifecycleResult<Vec<Task>> {
        self.list_partition(TaskStatus::Deleted).await
    }

    /// Lists the tasks in one status partition, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    #[tracing::instrument(skip_all, fields(status = %status))]
    pub async fn list_partition(&self, status: TaskStatus) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.find_by_status(status).await?;
        tracing::debug!(count = tasks.len(), "listed partition");
        Ok(tasks)
    }

    /// Adds a new active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the text is empty or
    /// whitespace only, or [`TaskLifecycleError::Repository`] when storage
    /// rejects the write.
    #[tracing::instrument(skip_all)]
    pub async fn add(&self, text: impl Into<String> + Send) -> TaskLifecycleResult<Task> {
        let text = TaskText::new(text).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected task text");
        })?;
        let task = self.repository.create(text, self.clock.utc()).await?;
        tracing::info!(task_id = %task.id(), "task added");
        Ok(task)
    }

    /// Applies a partial update and returns the resulting task.
    ///
    /// A request with neither a status nor non-blank text returns the stored
    /// task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown identifier or
    /// [`TaskLifecycleError::Repository`] when storage fails.
    #[tracing::instrument(skip_all, fields(task_id = %request.id()))]
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let id = request.id();
        let patch = request.into_patch();
        if patch.is_empty() {
            return self.find_or_not_found(id).await;
        }

        let task = self
            .repository
            .update_by_id(id, &patch, self.clock.utc())
            .await
            .map_err(TaskLifecycleError::from)
            .inspect_err(|err| tracing::warn!(error = %err, "task update failed"))?;
        tracing::info!(status = %task.status(), "task updated");
        Ok(task)
    }

    /// Marks a task as deleted, whatever its current status.
    ///
    /// Returns `true` once the status change is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown identifier or
    /// [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn soft_delete(&self, id: TaskId) -> TaskLifecycleResult<bool> {
        let request = UpdateTaskRequest::new(id).with_status(TaskStatus::Deleted);
        self.update(request).await?;
        Ok(true)
    }

    async fn find_or_not_found(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}
