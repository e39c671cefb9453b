use chrono::{DateTime, Duration, Utc};
use liveops_core::models::{AttendanceRecord, RiskClassification};
use liveops_core::state_machine::AttendanceStatus;
use proptest::prelude::*;

use super::builders::AttendanceRecordBuilder;

pub fn status_strategy() -> impl Strategy<Value = AttendanceStatus> {
    prop::sample::select(AttendanceStatus::ALL.to_vec())
}

pub fn risk_strategy() -> impl Strategy<Value = RiskClassification> {
    prop::sample::select(RiskClassification::ALL.to_vec())
}

/// Records inside a 12 hour window with ordered timestamps
pub fn record_strategy(now: DateTime<Utc>) -> impl Strategy<Value = AttendanceRecord> {
    (
        risk_strategy(),
        0i64..720,
        prop::option::of(0i64..=100),
        prop::option::of(0i64..=100),
    )
        .prop_map(move |(risk, entered, start_pct, discharge_pct)| {
            let mut builder = AttendanceRecordBuilder::new(now).risk(risk).entered(entered);
            if let Some(start_pct) = start_pct {
                let started = entered - entered * start_pct / 100;
                builder = builder.started(started);
                if let Some(discharge_pct) = discharge_pct {
                    builder = builder.discharged(started - started * discharge_pct / 100);
                }
            }
            builder.build()
        })
}

pub fn minutes_strategy() -> impl Strategy<Value = i64> {
    0i64..(Duration::days(7).num_minutes())
}
