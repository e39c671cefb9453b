//! # Status Transition Guard
//!
//! The attendance lifecycle is one-way: a patient waits, is attended, and is
//! discharged. The whole policy lives in [`TRANSITION_TABLE`], a from x to
//! grid whose cells either reject the change or name the timestamp to stamp.
//!
//! ```text
//!               WAITING     IN_PROGRESS        DISCHARGED
//! WAITING       apply       apply(start)       reject
//! IN_PROGRESS   reject      apply(start)       apply(discharge)
//! DISCHARGED    reject      reject             reject
//! ```
//!
//! IN_PROGRESS -> IN_PROGRESS re-stamps `start_time` with the current time.
//! That resets the wait reference of an attendance already being served and is
//! kept as observed behavior.

use chrono::{DateTime, Utc};

use super::errors::{invalid_transition, GuardResult};
use super::states::AttendanceStatus;
use crate::models::AttendanceRecord;

/// Side effect applied to the record when a transition is allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Status is written, no timestamp changes
    NoOp,
    /// `start_time = now`
    StampStart,
    /// `discharge_time = now`
    StampDischarge,
}

/// Outcome of a single cell of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Apply(TransitionEffect),
    Reject,
}

use TransitionEffect::{NoOp, StampDischarge, StampStart};
use TransitionOutcome::{Apply, Reject};

/// Rows are the current status, columns the requested one, both in
/// [`AttendanceStatus::ALL`] order.
pub const TRANSITION_TABLE: [[TransitionOutcome; 3]; 3] = [
    // WAITING ->
    [Apply(NoOp), Apply(StampStart), Reject],
    // IN_PROGRESS ->
    [Reject, Apply(StampStart), Apply(StampDischarge)],
    // DISCHARGED ->
    [Reject, Reject, Reject],
];

fn table_index(status: AttendanceStatus) -> usize {
    match status {
        AttendanceStatus::Waiting => 0,
        AttendanceStatus::InProgress => 1,
        AttendanceStatus::Discharged => 2,
    }
}

/// Validates and applies lifecycle status changes to a single record
pub struct TransitionGuard;

impl TransitionGuard {
    /// Look up the table cell for a (from, to) pair
    pub fn outcome(from: AttendanceStatus, to: AttendanceStatus) -> TransitionOutcome {
        TRANSITION_TABLE[table_index(from)][table_index(to)]
    }

    /// Check whether a transition is allowed without applying it
    pub fn can_transition(
        from: AttendanceStatus,
        to: AttendanceStatus,
    ) -> GuardResult<TransitionEffect> {
        match Self::outcome(from, to) {
            Apply(effect) => Ok(effect),
            Reject => Err(invalid_transition(from, to)),
        }
    }

    /// Produce the transitioned record.
    ///
    /// The input record is never touched; on rejection the caller still holds
    /// the original and nothing must be persisted.
    pub fn apply(
        record: &AttendanceRecord,
        requested: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> GuardResult<AttendanceRecord> {
        let effect = Self::can_transition(record.status, requested)?;

        let mut updated = record.clone();
        updated.status = requested;
        match effect {
            NoOp => {}
            StampStart => updated.start_time = Some(now),
            StampDischarge => updated.discharge_time = Some(now),
        }

        Ok(updated)
    }

    pub fn description() -> &'static str {
        "Attendance status must follow WAITING -> IN_PROGRESS -> DISCHARGED"
    }
}
