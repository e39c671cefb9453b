use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Initial state when the patient is triaged into the queue
    Waiting,
    /// Patient is currently being attended
    InProgress,
    /// Patient left the unit; no further transitions allowed
    Discharged,
}

impl AttendanceStatus {
    /// All statuses in lifecycle order
    pub const ALL: [AttendanceStatus; 3] = [Self::Waiting, Self::InProgress, Self::Discharged];

    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Discharged)
    }

    /// Check if the patient still counts towards the live queue
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::InProgress => "IN_PROGRESS",
            Self::Discharged => "DISCHARGED",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DISCHARGED" => Ok(Self::Discharged),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

/// Default state for new attendances
impl Default for AttendanceStatus {
    fn default() -> Self {
        Self::Waiting
    }
}
