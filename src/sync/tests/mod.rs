//! Unit tests for client synchronization.
