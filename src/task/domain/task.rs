//! Task record, status, and partial update types.

use super::{ParseTaskStatusError, TaskId, TaskText};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Every status is reachable from every other status through an update;
/// `Deleted` marks a soft-deleted record that stays in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open.
    Active,
    /// Task has been completed.
    Completed,
    /// Task has been soft-deleted.
    Deleted,
}

impl TaskStatus {
    /// All statuses, in partition display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Completed, Self::Deleted];

    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Deleted => "deleted",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            // `todo` is the legacy spelling of the active status.
            "active" | "todo" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "deleted" => Ok(Self::Deleted),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: TaskText,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task text.
    pub text: TaskText,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task with the given identifier.
    ///
    /// Stores call this when they assign identifiers at creation time.
    #[must_use]
    pub const fn new_active(id: TaskId, text: TaskText, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            status: TaskStatus::Active,
            created_at,
            updated_at: created_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// An empty patch leaves the task, including `updated_at`, untouched.
    pub fn apply(&mut self, patch: &TaskPatch, updated_at: DateTime<Utc>) {
        if patch.is_empty() {
            return;
        }
        if let Some(text) = patch.text() {
            self.text = text.clone();
        }
        if let Some(status) = patch.status() {
            self.status = status;
        }
        self.updated_at = updated_at;
    }
}

/// Partial update of a task's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    text: Option<TaskText>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: None,
            status: None,
        }
    }

    /// Sets the replacement text.
    #[must_use]
    pub fn with_text(mut self, text: TaskText) -> Self {
        self.text = Some(text);
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the replacement text, if any.
    #[must_use]
    pub const fn text(&self) -> Option<&TaskText> {
        self.text.as_ref()
    }

    /// Returns the replacement status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.status.is_none()
    }
}
