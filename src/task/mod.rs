//! Task lifecycle: storage, partition queries, and updates.
//!
//! Tasks are created active, may be moved freely between `active`,
//! `completed`, and `deleted`, and are never physically removed. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
