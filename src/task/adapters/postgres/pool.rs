//! Connection pool and schema bootstrap for the `PostgreSQL` adapter.

use super::repository::TaskPgPool;
use crate::config::StoreConfig;
use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;

/// SQL creating the `tasks` table and its partition index.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Builds a connection pool from store configuration.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open
/// its initial connections.
pub fn build_pool(config: &StoreConfig) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    Pool::builder()
        .max_size(config.pool_max_size())
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs()))
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// Applies the bundled schema. Safe to run repeatedly.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when a connection cannot be
/// obtained or the SQL fails.
pub fn apply_schema(pool: &TaskPgPool) -> TaskRepositoryResult<()> {
    let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
    connection
        .batch_execute(CREATE_TASKS_SQL)
        .map_err(TaskRepositoryError::persistence)?;
    tracing::info!("task schema applied");
    Ok(())
}
