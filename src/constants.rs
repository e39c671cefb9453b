//! # System Constants
//!
//! Operational defaults and status groupings shared across the crate.

pub use crate::state_machine::AttendanceStatus;

/// Lifecycle event names used in structured logs
pub mod events {
    use super::AttendanceStatus;

    pub const ATTENDANCE_CREATED: &str = "attendance.created";
    pub const ATTENDANCE_STARTED: &str = "attendance.started";
    pub const ATTENDANCE_DISCHARGED: &str = "attendance.discharged";
    pub const ATTENDANCE_REQUEUED: &str = "attendance.requeued";

    /// Event logged when a record lands in `status`
    pub fn for_status(status: AttendanceStatus) -> &'static str {
        match status {
            AttendanceStatus::Waiting => ATTENDANCE_REQUEUED,
            AttendanceStatus::InProgress => ATTENDANCE_STARTED,
            AttendanceStatus::Discharged => ATTENDANCE_DISCHARGED,
        }
    }
}

/// Defaults applied when configuration omits a value
pub mod system {
    /// Trailing window of entry times considered current
    pub const DEFAULT_WINDOW_HOURS: i64 = 12;

    /// Longest accepted analytics window, one year
    pub const MAX_WINDOW_HOURS: i64 = 8_760;

    /// Tolerance added to the RED tier threshold
    pub const DEFAULT_RED_GRACE_MINUTES: i64 = 5;

    pub const DEFAULT_CORE_POOL_SIZE: usize = 5;
    pub const DEFAULT_MAX_POOL_SIZE: usize = 20;
    pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
    pub const DEFAULT_THREAD_NAME_PREFIX: &str = "analytics-";

    pub const DEFAULT_MAX_DB_CONNECTIONS: u32 = 10;
}

/// Status groupings
pub mod status_groups {
    use super::AttendanceStatus;

    /// Statuses counted in the live queue
    pub const ACTIVE_STATUSES: &[AttendanceStatus] =
        &[AttendanceStatus::Waiting, AttendanceStatus::InProgress];

    pub const FINAL_STATUSES: &[AttendanceStatus] = &[AttendanceStatus::Discharged];
}
