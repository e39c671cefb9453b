use thiserror::Error;

use super::states::AttendanceStatus;

/// Error raised when the transition table forbids a status change
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: AttendanceStatus,
        to: AttendanceStatus,
    },
}

impl TransitionError {
    /// The (from, to) pair that was rejected
    pub fn pair(&self) -> (AttendanceStatus, AttendanceStatus) {
        match self {
            Self::InvalidTransition { from, to } => (*from, *to),
        }
    }
}

/// Result type alias for guard checks
pub type GuardResult<T> = Result<T, TransitionError>;

/// Helper function to create transition rejections
pub fn invalid_transition(from: AttendanceStatus, to: AttendanceStatus) -> TransitionError {
    TransitionError::InvalidTransition { from, to }
}
