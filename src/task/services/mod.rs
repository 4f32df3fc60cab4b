//! Application services for the task lifecycle.

mod error;
mod lifecycle;

pub use error::{ErrorKind, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{TaskLifecycleService, UpdateTaskRequest};
