//! Domain model for the task lifecycle.
//!
//! A task is a short piece of text with exactly one status. Deletion is a
//! status change, so every record ever created stays addressable by its
//! identifier.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskText};
pub use task::{PersistedTaskData, Task, TaskPatch, TaskStatus};
