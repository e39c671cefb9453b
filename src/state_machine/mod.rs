// State machine module for the attendance lifecycle
//
// The lifecycle is a small fixed table; see `guards` for the transition grid.

pub mod errors;
pub mod events;
pub mod guards;
pub mod states;

// Re-export main types for convenient access
pub use errors::{GuardResult, TransitionError};
pub use events::AttendanceEvent;
pub use guards::{TransitionEffect, TransitionGuard, TransitionOutcome, TRANSITION_TABLE};
pub use states::AttendanceStatus;
