//! Typed query/mutation contract over the task lifecycle.
//!
//! Three queries (`activeTasks`, `completedTasks`, `deletedTasks`) and three
//! mutations (`addTask`, `updateTask`, `deleteTask`). Requests and responses
//! are plain serde types so any transport can carry them:
//!
//! ```text
//! {"operation":"addTask","text":"buy milk"}
//! {"data":{"addTask":{"id":"…","text":"buy milk","status":"active"}}}
//! ```

mod error;
mod handler;
mod wire;

pub use error::ApiError;
pub use handler::{ApiResult, TaskApi};
pub use wire::{ApiErrorPayload, ApiRequest, ApiResponse, OperationResult, TaskPayload};

#[cfg(test)]
mod tests;
