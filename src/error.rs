//! Error types for the live operations core.
//!
//! The core never retries and has no notion of protocol status codes; the
//! boundary layer maps these variants to its own responses, using
//! [`LiveOpsError::is_client_error`] to tell caller mistakes from failures.

use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigurationError;
use crate::execution::WorkerPoolError;
use crate::state_machine::{AttendanceStatus, TransitionError};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LiveOpsError {
    #[error("Attendance not found with ID: {id}")]
    NotFound { id: Uuid },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: AttendanceStatus,
        to: AttendanceStatus,
    },

    #[error("Validation failed for one or more fields: {}", format_field_errors(.fields))]
    Validation { fields: BTreeMap<String, String> },

    #[error("Batch rejected: {reason}")]
    BatchRejected { reason: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LiveOpsError {
    /// Build a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        Self::Validation { fields }
    }

    /// Check if this is a caller error vs a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidTransition { .. }
                | Self::Validation { .. }
                | Self::BatchRejected { .. }
        )
    }
}

fn format_field_errors(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<TransitionError> for LiveOpsError {
    fn from(err: TransitionError) -> Self {
        let (from, to) = err.pair();
        Self::InvalidTransition { from, to }
    }
}

impl From<WorkerPoolError> for LiveOpsError {
    fn from(err: WorkerPoolError) -> Self {
        match err {
            WorkerPoolError::Rejected { .. } | WorkerPoolError::Closed => Self::BatchRejected {
                reason: err.to_string(),
            },
            WorkerPoolError::InvalidConfiguration(msg) => {
                Self::Configuration(ConfigurationError::validation_error(msg))
            }
        }
    }
}

pub type LiveOpsResult<T> = Result<T, LiveOpsError>;
