//! Shared world state for task partition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tickbox::{
    api::{ApiResponse, TaskApi, TaskPayload},
    task::{
        adapters::memory::InMemoryTaskRepository, domain::TaskStatus,
        services::TaskLifecycleService,
    },
};

/// API type used by the BDD world.
pub type TestTaskApi = TaskApi<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task partition behaviour tests.
pub struct TaskPartitionWorld {
    pub api: TestTaskApi,
    pub last_task: Option<TaskPayload>,
    pub last_response: Option<ApiResponse>,
}

impl TaskPartitionWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let api = TaskApi::new(TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        ));

        Self {
            api,
            last_task: None,
            last_response: None,
        }
    }

    /// Returns the task most recently added or updated.
    pub fn current_task(&self) -> Result<&TaskPayload, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Fetches one partition through its query.
    pub fn partition(&self, status: &str) -> Result<Vec<TaskPayload>, eyre::Report> {
        let status = TaskStatus::try_from(status)
            .map_err(|err| eyre::eyre!("invalid partition in scenario: {err}"))?;
        let tasks = match status {
            TaskStatus::Active => run_async(self.api.active_tasks()),
            TaskStatus::Completed => run_async(self.api.completed_tasks()),
            TaskStatus::Deleted => run_async(self.api.deleted_tasks()),
        };
        tasks.map_err(|err| eyre::eyre!("partition query failed: {err}"))
    }
}

impl Default for TaskPartitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskPartitionWorld {
    TaskPartitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
