//! Unit tests for the API surface.
