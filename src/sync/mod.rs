//! Client-side consistency after writes.
//!
//! A mutation can move a task between partitions, so instead of patching
//! cached query results the client re-runs every partition query the
//! mutation could have affected. [`partitions_to_refresh`] is that rule;
//! [`SyncedTaskClient`] applies it.

mod client;
mod policy;

pub use client::{ClientError, MutationOutcome, PartitionSnapshot, SyncedTaskClient, TaskGateway};
pub use policy::{MutationEffect, PartitionSet, partitions_to_refresh};

#[cfg(test)]
mod tests;
