//! Tickbox: a soft-deleting task list with a partitioned query/mutation API.
//!
//! Tasks carry one status out of `active`, `completed`, and `deleted`. The
//! API exposes one query per status and three mutations; the client keeps
//! its copy of the partitions consistent by re-running the queries a
//! mutation could have affected.
//!
//! # Architecture
//!
//! Tickbox follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task model, storage port and adapters, lifecycle service
//! - [`api`]: Wire-level query/mutation contract
//! - [`sync`]: Re-fetch policy and synchronized client
//! - [`config`]: Store configuration
//! - [`telemetry`]: Tracing setup for binaries

pub mod api;
pub mod config;
pub mod sync;
pub mod task;
pub mod telemetry;
