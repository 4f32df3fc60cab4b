//! Step definitions for task partition scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
