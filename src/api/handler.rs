//! Query and mutation handlers over the lifecycle service.

use super::{
    error::ApiError,
    wire::{ApiRequest, ApiResponse, OperationResult, TaskPayload},
};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{TaskLifecycleService, UpdateTaskRequest},
};
use mockable::Clock;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Executes wire requests against a [`TaskLifecycleService`].
///
/// Each handler is a pass-through: it checks argument syntax and leaves
/// content rules such as non-empty text to the service.
#[derive(Clone)]
pub struct TaskApi<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, C>,
}

impl<R, C> TaskApi<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates an API over the given service.
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self { service }
    }

    /// `query activeTasks`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Lifecycle`] when storage fails.
    pub async fn active_tasks(&self) -> ApiResult<Vec<TaskPayload>> {
        Ok(to_payloads(self.service.list_active().await?))
    }

    /// `query completedTasks`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Lifecycle`] when storage fails.
    pub async fn completed_tasks(&self) -> ApiResult<Vec<TaskPayload>> {
        Ok(to_payloads(self.service.list_completed().await?))
    }

    /// `query deletedTasks`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Lifecycle`] when storage fails.
    pub async fn deleted_tasks(&self) -> ApiResult<Vec<TaskPayload>> {
        Ok(to_payloads(self.service.list_deleted().await?))
    }

    /// `mutation addTask(text)`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Lifecycle`] for empty text or storage failure.
    pub async fn add_task(&self, text: String) -> ApiResult<TaskPayload> {
        let task = self.service.add(text).await?;
        Ok(TaskPayload::from(task))
    }

    /// `mutation updateTask(id, text?, status?)`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] for an identifier that cannot name a
    /// task, [`ApiError::InvalidStatus`] for an unknown status, and
    /// [`ApiError::Lifecycle`] when the task is missing or storage fails.
    pub async fn update_task(
        &self,
        id: &str,
        text: Option<String>,
        status: Option<&str>,
    ) -> ApiResult<TaskPayload> {
        let mut request = UpdateTaskRequest::new(parse_id(id)?);
        if let Some(text) = text {
            request = request.with_text(text);
        }
        if let Some(status) = status {
            request = request.with_status(TaskStatus::try_from(status)?);
        }
        let task = self.service.update(request).await?;
        Ok(TaskPayload::from(task))
    }

    /// `mutation deleteTask(id)`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] for a malformed identifier and
    /// [`ApiError::Lifecycle`] when the task is missing or storage fails.
    pub async fn delete_task(&self, id: &str) -> ApiResult<bool> {
        Ok(self.service.soft_delete(parse_id(id)?).await?)
    }

    /// Dispatches a decoded request.
    ///
    /// # Errors
    ///
    /// Propagates the error of the dispatched handler unchanged.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResult<OperationResult> {
        let result = match request {
            ApiRequest::ActiveTasks => OperationResult::ActiveTasks(self.active_tasks().await?),
            ApiRequest::CompletedTasks => {
                OperationResult::CompletedTasks(self.completed_tasks().await?)
            }
            ApiRequest::DeletedTasks => OperationResult::DeletedTasks(self.deleted_tasks().await?),
            ApiRequest::AddTask { text } => OperationResult::AddTask(self.add_task(text).await?),
            ApiRequest::UpdateTask { id, text, status } => OperationResult::UpdateTask(
                self.update_task(&id, text, status.as_deref()).await?,
            ),
            ApiRequest::DeleteTask { id } => {
                OperationResult::DeleteTask(self.delete_task(&id).await?)
            }
        };
        Ok(result)
    }

    /// Executes a decoded request and wraps the outcome in a response
    /// envelope.
    #[tracing::instrument(skip_all, fields(operation = request.operation_name()))]
    pub async fn execute(&self, request: ApiRequest) -> ApiResponse {
        match self.dispatch(request).await {
            Ok(result) => ApiResponse::Data(result),
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "operation rejected");
                ApiResponse::Errors(vec![err.to_payload()])
            }
        }
    }

    /// Decodes a JSON request body and executes it.
    ///
    /// Bodies that do not decode, including ones missing a required
    /// argument, produce a validation error response.
    pub async fn execute_json(&self, body: &str) -> ApiResponse {
        match serde_json::from_str::<ApiRequest>(body) {
            Ok(request) => self.execute(request).await,
            Err(err) => ApiResponse::Errors(vec![ApiError::from(err).to_payload()]),
        }
    }
}

fn parse_id(raw: &str) -> ApiResult<TaskId> {
    raw.parse::<TaskId>().map_err(ApiError::InvalidId)
}

fn to_payloads(tasks: Vec<Task>) -> Vec<TaskPayload> {
    tasks.into_iter().map(TaskPayload::from).collect()
}
