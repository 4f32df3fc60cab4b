//! Re-fetch policy: which partitions a successful mutation can have changed.

use crate::task::domain::TaskStatus;
use std::fmt;

/// Set of status partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PartitionSet {
    active: bool,
    completed: bool,
    deleted: bool,
}

impl PartitionSet {
    /// Returns the empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            active: false,
            completed: false,
            deleted: false,
        }
    }

    /// Returns the set of all three partitions.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            active: true,
            completed: true,
            deleted: true,
        }
    }

    /// Returns a set with the given partitions.
    #[must_use]
    pub fn of(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        statuses.into_iter().fold(Self::empty(), Self::with)
    }

    /// Returns this set plus `status`.
    #[must_use]
    pub const fn with(mut self, status: TaskStatus) -> Self {
        match status {
            TaskStatus::Active => self.active = true,
            TaskStatus::Completed => self.completed = true,
            TaskStatus::Deleted => self.deleted = true,
        }
        self
    }

    /// Returns `true` when `status` is in the set.
    #[must_use]
    pub const fn contains(self, status: TaskStatus) -> bool {
        match status {
            TaskStatus::Active => self.active,
            TaskStatus::Completed => self.completed,
            TaskStatus::Deleted => self.deleted,
        }
    }

    /// Returns `true` when the set holds no partition.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.active && !self.completed && !self.deleted
    }

    /// Iterates the members in partition display order.
    pub fn iter(self) -> impl Iterator<Item = TaskStatus> {
        TaskStatus::ALL
            .into_iter()
            .filter(move |status| self.contains(*status))
    }
}

impl fmt::Display for PartitionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(TaskStatus::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// What a successful mutation did to the affected task.
///
/// `before` is the status the client last saw for the task; `None` means
/// the client did not hold the task in any partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEffect {
    /// A new active task was created.
    Added,
    /// A task was updated.
    Updated {
        /// Status before the update, if known.
        before: Option<TaskStatus>,
        /// Status returned by the update.
        after: TaskStatus,
        /// Whether the update replaced the text.
        text_edited: bool,
    },
    /// A task was soft-deleted.
    Deleted {
        /// Status before the delete, if known.
        before: Option<TaskStatus>,
    },
}

/// Returns the partitions whose query results may have changed.
///
/// | Mutation                         | Partitions                |
/// |----------------------------------|---------------------------|
/// | add                              | active, completed, deleted |
/// | update changing status `a → b`   | a, b                      |
/// | update editing text only         | the task's partition      |
/// | delete of a task in `a`          | a, deleted                |
///
/// A text-only edit refreshes the partition the task is in; for an edit of
/// an active task that is just `active`. When the prior status is unknown
/// every partition is refreshed.
#[must_use]
pub fn partitions_to_refresh(effect: MutationEffect) -> PartitionSet {
    match effect {
        MutationEffect::Added
        | MutationEffect::Updated { before: None, .. }
        | MutationEffect::Deleted { before: None } => PartitionSet::all(),
        MutationEffect::Updated {
            before: Some(before),
            after,
            text_edited,
        } => {
            let mut partitions = PartitionSet::empty();
            if before != after {
                partitions = partitions.with(before).with(after);
            }
            if text_edited {
                partitions = partitions.with(after);
            }
            partitions
        }
        MutationEffect::Deleted {
            before: Some(before),
        } => PartitionSet::empty().with(before).with(TaskStatus::Deleted),
    }
}
