//! Errors raised at the API boundary.

use super::wire::ApiErrorPayload;
use crate::task::{
    domain::{ParseTaskStatusError, TaskDomainError},
    services::{ErrorKind, TaskLifecycleError},
};
use thiserror::Error;

/// Errors produced while decoding or executing an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not a well-formed operation, or a required
    /// argument was missing.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// An identifier argument was not a valid task identifier, so it cannot
    /// name any stored task.
    #[error(transparent)]
    InvalidId(TaskDomainError),

    /// A status argument was not one of the known statuses.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The lifecycle service rejected the operation.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

impl ApiError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedRequest(_) | Self::InvalidStatus(_) => ErrorKind::Validation,
            Self::InvalidId(_) => ErrorKind::NotFound,
            Self::Lifecycle(err) => err.kind(),
        }
    }

    /// Converts the error into its wire payload.
    #[must_use]
    pub fn to_payload(&self) -> ApiErrorPayload {
        ApiErrorPayload {
            message: self.to_string(),
            kind: self.kind(),
        }
    }
}
