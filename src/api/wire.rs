//! Wire types for the task query/mutation contract.
//!
//! Field and operation names are part of the contract and must not change.

use crate::task::{domain::Task, services::ErrorKind};
use serde::{Deserialize, Serialize};

/// Wire representation of a task: `{ id, text, status }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task identifier as a UUID string.
    pub id: String,
    /// Task text.
    pub text: String,
    /// Task status: `active`, `completed`, or `deleted`.
    pub status: String,
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            text: task.text().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
        }
    }
}

impl From<Task> for TaskPayload {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

/// A single query or mutation, tagged by its wire operation name.
///
/// Serialized as `{"operation": "<name>", ...arguments}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum ApiRequest {
    /// `query activeTasks -> [Task]`
    ActiveTasks,
    /// `query completedTasks -> [Task]`
    CompletedTasks,
    /// `query deletedTasks -> [Task]`
    DeletedTasks,
    /// `mutation addTask(text) -> Task`
    AddTask {
        /// Task text.
        text: String,
    },
    /// `mutation updateTask(id, text?, status?) -> Task`
    UpdateTask {
        /// Target task identifier.
        id: String,
        /// Replacement text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Replacement status.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
    /// `mutation deleteTask(id) -> Boolean`
    DeleteTask {
        /// Target task identifier.
        id: String,
    },
}

impl ApiRequest {
    /// Returns the wire operation name.
    #[must_use]
    pub const fn operation_name(&self) -> &'static str {
        match self {
            Self::ActiveTasks => "activeTasks",
            Self::CompletedTasks => "completedTasks",
            Self::DeletedTasks => "deletedTasks",
            Self::AddTask { .. } => "addTask",
            Self::UpdateTask { .. } => "updateTask",
            Self::DeleteTask { .. } => "deleteTask",
        }
    }

    /// Returns `true` for the three mutations.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddTask { .. } | Self::UpdateTask { .. } | Self::DeleteTask { .. }
        )
    }
}

/// Successful operation result, keyed by the operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationResult {
    /// Result of `activeTasks`.
    ActiveTasks(Vec<TaskPayload>),
    /// Result of `completedTasks`.
    CompletedTasks(Vec<TaskPayload>),
    /// Result of `deletedTasks`.
    DeletedTasks(Vec<TaskPayload>),
    /// Result of `addTask`.
    AddTask(TaskPayload),
    /// Result of `updateTask`.
    UpdateTask(TaskPayload),
    /// Result of `deleteTask`.
    DeleteTask(bool),
}

/// Error entry in a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    /// Human-readable description.
    pub message: String,
    /// Failure class.
    pub kind: ErrorKind,
}

/// Response envelope: `{"data": {...}}` or `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiResponse {
    /// The operation succeeded.
    Data(OperationResult),
    /// The operation was rejected.
    Errors(Vec<ApiErrorPayload>),
}

impl ApiResponse {
    /// Converts the envelope into a `Result`, keeping the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiErrorPayload`] of a failed response. An
    /// `errors` envelope with no entries is reported as a storage failure.
    pub fn into_result(self) -> Result<OperationResult, ApiErrorPayload> {
        match self {
            Self::Data(result) => Ok(result),
            Self::Errors(errors) => {
                Err(errors
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| ApiErrorPayload {
                        message: "empty error response".to_owned(),
                        kind: ErrorKind::Storage,
                    }))
            }
        }
    }

    /// Serializes the envelope to JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
