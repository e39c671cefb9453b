use serde::{Deserialize, Serialize};

use super::states::AttendanceStatus;

/// Events that can trigger attendance state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttendanceEvent {
    /// Call the patient in (or re-stamp an attendance already in progress)
    Start,
    /// Patient leaves the unit
    Discharge,
    /// Put the patient back in the waiting line
    Requeue,
}

impl AttendanceEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Discharge => "discharge",
            Self::Requeue => "requeue",
        }
    }

    /// Status the event asks for
    pub fn requested_status(&self) -> AttendanceStatus {
        match self {
            Self::Start => AttendanceStatus::InProgress,
            Self::Discharge => AttendanceStatus::Discharged,
            Self::Requeue => AttendanceStatus::Waiting,
        }
    }

    /// Check if this event represents a terminal transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Discharge)
    }
}

impl From<AttendanceStatus> for AttendanceEvent {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Waiting => Self::Requeue,
            AttendanceStatus::InProgress => Self::Start,
            AttendanceStatus::Discharged => Self::Discharge,
        }
    }
}
