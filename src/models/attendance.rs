//! # Attendance Model
//!
//! One episode of a patient's visit to one health unit.
//!
//! ## Lifecycle
//!
//! A record is created in `WAITING` by the intake operation with
//! `entry_time = now`, and afterwards changes only through the
//! [`TransitionGuard`](crate::state_machine::TransitionGuard). `start_time` is
//! stamped on entering `IN_PROGRESS`, `discharge_time` on entering
//! `DISCHARGED`. Once discharged the record is never written again.
//!
//! ## Invariants
//!
//! - `entry_time <= start_time <= discharge_time` whenever set
//! - `id`, `health_unit_id`, `patient` and `risk_classification` never change

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::risk_classification::RiskClassification;
use crate::state_machine::AttendanceStatus;

/// Identifying data of the patient, embedded in the attendance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    /// External document id (national health card or similar)
    pub document: String,
}

impl Patient {
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
        }
    }
}

/// A persisted attendance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub health_unit_id: String,
    pub patient: Patient,
    pub risk_classification: RiskClassification,
    pub status: AttendanceStatus,
    pub entry_time: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub discharge_time: Option<DateTime<Utc>>,
}

/// Validated intake data for a new attendance (without store-generated fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub health_unit_id: String,
    pub patient: Patient,
    pub risk_classification: RiskClassification,
    pub entry_time: DateTime<Utc>,
}

impl NewAttendance {
    /// Materialize the record once the store has assigned an id
    pub fn into_record(self, id: Uuid) -> AttendanceRecord {
        AttendanceRecord {
            id,
            health_unit_id: self.health_unit_id,
            patient: self.patient,
            risk_classification: self.risk_classification,
            status: AttendanceStatus::Waiting,
            entry_time: self.entry_time,
            start_time: None,
            discharge_time: None,
        }
    }
}

impl AttendanceRecord {
    /// Whole minutes between entry and service start, or `now` while still waiting
    pub fn effective_wait_minutes(&self, now: DateTime<Utc>) -> i64 {
        let end = self.start_time.unwrap_or(now);
        (end - self.entry_time).num_minutes()
    }

    /// Whole minutes between entry and discharge, if discharged
    pub fn total_stay_minutes(&self) -> Option<i64> {
        self.discharge_time
            .map(|discharged| (discharged - self.entry_time).num_minutes())
    }

    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_waiting(&self) -> bool {
        self.status == AttendanceStatus::Waiting
    }

    pub fn is_discharged(&self) -> bool {
        self.status == AttendanceStatus::Discharged
    }

    /// Check the timestamp ordering invariant
    pub fn timestamps_are_ordered(&self) -> bool {
        let start_ok = self.start_time.map_or(true, |s| self.entry_time <= s);
        let discharge_ok = match (self.start_time, self.discharge_time) {
            (Some(s), Some(d)) => s <= d,
            (None, Some(d)) => self.entry_time <= d,
            _ => true,
        };
        start_ok && discharge_ok
    }
}
