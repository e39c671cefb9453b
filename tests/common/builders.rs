//! Attendance record builders with times relative to a reference instant.

use chrono::{DateTime, Duration, Utc};
use liveops_core::models::{AttendanceRecord, NewAttendance, Patient, RiskClassification};
use liveops_core::state_machine::AttendanceStatus;
use uuid::Uuid;

pub struct AttendanceRecordBuilder {
    now: DateTime<Utc>,
    health_unit_id: String,
    risk: RiskClassification,
    entered_minutes_ago: i64,
    started_minutes_ago: Option<i64>,
    discharged_minutes_ago: Option<i64>,
}

impl AttendanceRecordBuilder {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            health_unit_id: "unit-1".to_string(),
            risk: RiskClassification::Green,
            entered_minutes_ago: 0,
            started_minutes_ago: None,
            discharged_minutes_ago: None,
        }
    }

    pub fn unit(mut self, health_unit_id: &str) -> Self {
        self.health_unit_id = health_unit_id.to_string();
        self
    }

    pub fn risk(mut self, risk: RiskClassification) -> Self {
        self.risk = risk;
        self
    }

    pub fn entered(mut self, minutes_ago: i64) -> Self {
        self.entered_minutes_ago = minutes_ago;
        self
    }

    pub fn started(mut self, minutes_ago: i64) -> Self {
        self.started_minutes_ago = Some(minutes_ago);
        self
    }

    pub fn discharged(mut self, minutes_ago: i64) -> Self {
        self.discharged_minutes_ago = Some(minutes_ago);
        self
    }

    /// Status follows from the stamped times
    pub fn build(self) -> AttendanceRecord {
        let ago = |minutes: i64| self.now - Duration::minutes(minutes);

        let mut record = NewAttendance {
            health_unit_id: self.health_unit_id.clone(),
            patient: Patient::new("Test Patient", "00000000000"),
            risk_classification: self.risk,
            entry_time: ago(self.entered_minutes_ago),
        }
        .into_record(Uuid::new_v4());

        record.start_time = self.started_minutes_ago.map(ago);
        record.discharge_time = self.discharged_minutes_ago.map(ago);
        record.status = match (record.start_time, record.discharge_time) {
            (_, Some(_)) => AttendanceStatus::Discharged,
            (Some(_), None) => AttendanceStatus::InProgress,
            (None, None) => AttendanceStatus::Waiting,
        };
        record
    }
}
