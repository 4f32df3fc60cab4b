//! Client that keeps a local copy of the three partitions in step with the
//! server.

use super::policy::{MutationEffect, PartitionSet, partitions_to_refresh};
use crate::api::{ApiRequest, ApiResponse, OperationResult, TaskApi, TaskPayload};
use crate::task::{domain::TaskStatus, ports::TaskRepository, services::ErrorKind};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Transport-agnostic access to the task API.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Executes one request and returns the response envelope.
    async fn execute(&self, request: ApiRequest) -> ApiResponse;
}

#[async_trait]
impl<R, C> TaskGateway for TaskApi<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn execute(&self, request: ApiRequest) -> ApiResponse {
        Self::execute(self, request).await
    }
}

/// Result of a mutation the server has already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Task returned by `addTask` or `updateTask`.
    Task(TaskPayload),
    /// Result of `deleteTask`.
    Deleted(bool),
}

/// Errors reported by [`SyncedTaskClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The server rejected the operation.
    #[error("{operation} rejected: {message}")]
    Rejected {
        /// Wire operation name.
        operation: &'static str,
        /// Failure class reported by the server.
        kind: ErrorKind,
        /// Server message.
        message: String,
    },

    /// The server answered with a result for a different operation.
    #[error("unexpected response to {0}")]
    UnexpectedResponse(&'static str),

    /// The task is not present in the local snapshot.
    #[error("task {0} is not loaded")]
    NotLoaded(String),

    /// The mutation was stored but re-fetching the affected partitions
    /// failed. The snapshot is stale; the mutation must not be resent.
    #[error("{operation} applied but refresh failed: {source}")]
    RefreshFailed {
        /// Wire operation name of the applied mutation.
        operation: &'static str,
        /// What the server returned for the mutation.
        outcome: MutationOutcome,
        /// The refresh failure.
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Classifies the error.
    ///
    /// A failed refresh after an applied mutation reports the refresh's kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected { kind, .. } => *kind,
            Self::UnexpectedResponse(_) => ErrorKind::Storage,
            Self::NotLoaded(_) => ErrorKind::NotFound,
            Self::RefreshFailed { source, .. } => source.kind(),
        }
    }

    /// Returns the server's result when the mutation was applied despite
    /// this error.
    #[must_use]
    pub const fn applied(&self) -> Option<&MutationOutcome> {
        match self {
            Self::RefreshFailed { outcome, .. } => Some(outcome),
            Self::Rejected { .. } | Self::UnexpectedResponse(_) | Self::NotLoaded(_) => None,
        }
    }
}

/// Local copy of the three partition query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSnapshot {
    active: Vec<TaskPayload>,
    completed: Vec<TaskPayload>,
    deleted: Vec<TaskPayload>,
}

impl PartitionSnapshot {
    /// Returns the last fetched tasks of one partition.
    #[must_use]
    pub fn partition(&self, status: TaskStatus) -> &[TaskPayload] {
        match status {
            TaskStatus::Active => &self.active,
            TaskStatus::Completed => &self.completed,
            TaskStatus::Deleted => &self.deleted,
        }
    }

    /// Returns the partition holding the task with `id`, if any.
    #[must_use]
    pub fn status_of(&self, id: &str) -> Option<TaskStatus> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| self.partition(*status).iter().any(|task| task.id == id))
    }

    fn replace(&mut self, status: TaskStatus, tasks: Vec<TaskPayload>) {
        match status {
            TaskStatus::Active => self.active = tasks,
            TaskStatus::Completed => self.completed = tasks,
            TaskStatus::Deleted => self.deleted = tasks,
        }
    }
}

/// Task client that re-fetches affected partitions after every successful
/// mutation.
///
/// A rejected mutation leaves the snapshot as it was and issues no query.
/// When a mutation is applied but the refresh after it fails, the error is
/// [`ClientError::RefreshFailed`] carrying the mutation's result.
pub struct SyncedTaskClient<G: TaskGateway> {
    gateway: Arc<G>,
    snapshot: PartitionSnapshot,
    last_refresh: PartitionSet,
}

impl<G: TaskGateway> SyncedTaskClient<G> {
    /// Creates a client with an empty snapshot.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            snapshot: PartitionSnapshot::default(),
            last_refresh: PartitionSet::empty(),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &PartitionSnapshot {
        &self.snapshot
    }

    /// Returns the partitions fetched by the most recent refresh.
    #[must_use]
    pub const fn last_refresh(&self) -> PartitionSet {
        self.last_refresh
    }

    /// Fetches all three partitions.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when any query fails; the snapshot is then
    /// left unchanged.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.refresh(PartitionSet::all()).await
    }

    /// Re-fetches the given partitions and replaces them in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when any query fails; the snapshot is then
    /// left unchanged.
    pub async fn refresh(&mut self, partitions: PartitionSet) -> Result<(), ClientError> {
        let mut fetched = Vec::new();
        for status in partitions.iter() {
            fetched.push((status, self.fetch_partition(status).await?));
        }
        for (status, tasks) in fetched {
            self.snapshot.replace(status, tasks);
        }
        tracing::debug!(%partitions, "partitions refreshed");
        self.last_refresh = partitions;
        Ok(())
    }

    /// Adds a task, then refreshes every partition.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the server refuses the task and
    /// [`ClientError::RefreshFailed`] when it was added but a refresh query
    /// failed.
    pub async fn add_task(&mut self, text: impl Into<String>) -> Result<TaskPayload, ClientError> {
        let request = ApiRequest::AddTask { text: text.into() };
        let OperationResult::AddTask(task) = self.send(request).await? else {
            return Err(ClientError::UnexpectedResponse("addTask"));
        };
        self.refresh_after(
            "addTask",
            MutationOutcome::Task(task.clone()),
            partitions_to_refresh(MutationEffect::Added),
        )
        .await?;
        Ok(task)
    }

    /// Updates a task, then refreshes the partitions it left or entered.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the server refuses the update
    /// and [`ClientError::RefreshFailed`] when it was applied but a refresh
    /// query failed.
    pub async fn update_task(
        &mut self,
        id: &str,
        text: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<TaskPayload, ClientError> {
        let before = self.snapshot.status_of(id);
        let text_edited = text.is_some();
        let request = ApiRequest::UpdateTask {
            id: id.to_owned(),
            text,
            status: status.map(|value| value.as_str().to_owned()),
        };
        let OperationResult::UpdateTask(task) = self.send(request).await? else {
            return Err(ClientError::UnexpectedResponse("updateTask"));
        };
        let after = TaskStatus::try_from(task.status.as_str())
            .map_err(|_| ClientError::UnexpectedResponse("updateTask"))?;

        let partitions = partitions_to_refresh(MutationEffect::Updated {
            before,
            after,
            text_edited,
        });
        self.refresh_after("updateTask", MutationOutcome::Task(task.clone()), partitions)
            .await?;
        Ok(task)
    }

    /// Replaces a task's text.
    ///
    /// # Errors
    ///
    /// See [`SyncedTaskClient::update_task`].
    pub async fn edit_text(
        &mut self,
        id: &str,
        text: impl Into<String>,
    ) -> Result<TaskPayload, ClientError> {
        self.update_task(id, Some(text.into()), None).await
    }

    /// Flips a loaded task between `active` and `completed`.
    ///
    /// Tasks in any other partition are moved back to `active`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoaded`] when the task is not in the
    /// snapshot, otherwise see [`SyncedTaskClient::update_task`].
    pub async fn toggle_complete(&mut self, id: &str) -> Result<TaskPayload, ClientError> {
        let target = match self.snapshot.status_of(id) {
            Some(TaskStatus::Active) => TaskStatus::Completed,
            Some(TaskStatus::Completed | TaskStatus::Deleted) => TaskStatus::Active,
            None => return Err(ClientError::NotLoaded(id.to_owned())),
        };
        self.update_task(id, None, Some(target)).await
    }

    /// Soft-deletes a task, then refreshes its old partition and `deleted`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the server refuses the delete
    /// and [`ClientError::RefreshFailed`] when it was applied but a refresh
    /// query failed.
    pub async fn delete_task(&mut self, id: &str) -> Result<bool, ClientError> {
        let before = self.snapshot.status_of(id);
        let request = ApiRequest::DeleteTask { id: id.to_owned() };
        let OperationResult::DeleteTask(deleted) = self.send(request).await? else {
            return Err(ClientError::UnexpectedResponse("deleteTask"));
        };
        self.refresh_after(
            "deleteTask",
            MutationOutcome::Deleted(deleted),
            partitions_to_refresh(MutationEffect::Deleted { before }),
        )
        .await?;
        Ok(deleted)
    }

    async fn refresh_after(
        &mut self,
        operation: &'static str,
        outcome: MutationOutcome,
        partitions: PartitionSet,
    ) -> Result<(), ClientError> {
        self.refresh(partitions).await.map_err(|source| {
            tracing::warn!(operation, error = %source, "mutation applied but refresh failed");
            ClientError::RefreshFailed {
                operation,
                outcome,
                source: Box::new(source),
            }
        })
    }

    async fn fetch_partition(&self, status: TaskStatus) -> Result<Vec<TaskPayload>, ClientError> {
        let request = match status {
            TaskStatus::Active => ApiRequest::ActiveTasks,
            TaskStatus::Completed => ApiRequest::CompletedTasks,
            TaskStatus::Deleted => ApiRequest::DeletedTasks,
        };
        let operation = request.operation_name();
        match (status, self.send(request).await?) {
            (TaskStatus::Active, OperationResult::ActiveTasks(tasks))
            | (TaskStatus::Completed, OperationResult::CompletedTasks(tasks))
            | (TaskStatus::Deleted, OperationResult::DeletedTasks(tasks)) => Ok(tasks),
            _ => Err(ClientError::UnexpectedResponse(operation)),
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<OperationResult, ClientError> {
        let operation = request.operation_name();
        self.gateway
            .execute(request)
            .await
            .into_result()
            .map_err(|err| ClientError::Rejected {
                operation,
                kind: err.kind,
                message: err.message,
            })
    }
}
