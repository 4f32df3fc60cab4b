//! Command-line access to a `PostgreSQL`-backed task store.
//!
//! Usage:
//!
//! ```text
//! tickbox [--config <path>] migrate
//! tickbox [--config <path>] exec '{"operation":"addTask","text":"buy milk"}'
//! ```
//!
//! Without `--config`, the database URL is read from `TICKBOX_DATABASE_URL`
//! or `DATABASE_URL`. `exec` writes the JSON response envelope to stdout and
//! exits non-zero when the operation was rejected.

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tickbox::api::{ApiResponse, TaskApi};
use tickbox::config::StoreConfig;
use tickbox::task::adapters::postgres::{PostgresTaskRepository, apply_schema, build_pool};
use tickbox::task::services::TaskLifecycleService;
use tickbox::telemetry::init_tracing;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "tickbox", about = "Task store query/mutation runner")]
struct Cli {
    /// TOML file with store settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the task table if it does not exist.
    Migrate,
    /// Execute one JSON-encoded query or mutation.
    Exec {
        /// Request body, e.g. `{"operation":"activeTasks"}`.
        request: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => StoreConfig::load(&path)?,
        None => StoreConfig::from_env()?,
    };
    let pool = tokio::task::spawn_blocking(move || build_pool(&config)).await??;

    match cli.command {
        Command::Migrate => {
            tokio::task::spawn_blocking(move || apply_schema(&pool)).await??;
            Ok(ExitCode::SUCCESS)
        }
        Command::Exec { request } => {
            let repository = Arc::new(PostgresTaskRepository::new(pool));
            let api = TaskApi::new(TaskLifecycleService::new(
                repository,
                Arc::new(DefaultClock),
            ));
            let response = api.execute_json(&request).await;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", response.to_json()?)?;
            Ok(match response {
                ApiResponse::Data(_) => ExitCode::SUCCESS,
                ApiResponse::Errors(_) => ExitCode::FAILURE,
            })
        }
    }
}
