//! Shared test helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use tickbox::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool, apply_schema},
    services::TaskLifecycleService,
};
use uuid::Uuid;

/// Environment variable naming the test server.
pub const TEST_DATABASE_URL_ENV: &str = "TICKBOX_TEST_DATABASE_URL";

/// Boxed error type for test results.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(r2d2::Error::QueryError)
    }
}

/// A migrated schema private to one test, dropped on drop.
pub struct TaskStoreContext {
    pub repository: Arc<PostgresTaskRepository>,
    pub service: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
    url: String,
    schema: String,
}

impl Drop for TaskStoreContext {
    fn drop(&mut self) {
        if let Ok(mut conn) = PgConnection::establish(&self.url) {
            let _dropped = conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema));
        }
    }
}

fn build_schema_pool(url: &str, schema: &str) -> Result<TaskPgPool, BoxError> {
    let mut conn = PgConnection::establish(url)?;
    conn.batch_execute(&format!("CREATE SCHEMA {schema}"))?;

    let pool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(schema.to_owned())))
        .build(ConnectionManager::<PgConnection>::new(url))?;
    apply_schema(&pool)?;
    Ok(pool)
}

/// Creates a migrated schema and a service over it.
///
/// # Errors
///
/// Returns an error if no test server is configured, the server is
/// unreachable, or migration fails.
pub async fn setup_store() -> Result<TaskStoreContext, BoxError> {
    let url = std::env::var(TEST_DATABASE_URL_ENV)
        .map_err(|_| format!("{TEST_DATABASE_URL_ENV} must name a PostgreSQL server"))?;
    let schema = format!("tickbox_test_{}", Uuid::new_v4().simple());

    let pool = {
        let url = url.clone();
        let schema = schema.clone();
        tokio::task::spawn_blocking(move || build_schema_pool(&url, &schema)).await??
    };
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let service = TaskLifecycleService::new(repository.clone(), Arc::new(DefaultClock));
    Ok(TaskStoreContext {
        repository,
        service,
        url,
        schema,
    })
}
