//! # Queue Analytics
//!
//! Pure computations over an already-fetched record set:
//!
//! - [`snapshot`]: live-queue counts
//! - [`weighted_wait`]: time-decayed weighted average wait
//! - [`sla`]: per-tier SLA evaluation
//!
//! [`analyze_unit`] composes the three for one unit. Fetching the window and
//! fanning out across units lives in
//! [`AnalyticsService`](crate::services::AnalyticsService).

pub mod sla;
pub mod snapshot;
pub mod types;
pub mod weighted_wait;

use chrono::{DateTime, Utc};

use crate::models::AttendanceRecord;

pub use sla::{SlaEvaluator, DEFAULT_RED_GRACE_MINUTES};
pub use snapshot::snapshot;
pub use types::{LiveQueueSnapshot, RiskAttendancePerformance, UnitAnalytics, UnitMetrics};
pub use weighted_wait::{decay_weight, general_weighted_wait, weight, weighted_average};

/// Full analytics for one unit over its windowed records
pub fn analyze_unit(
    health_unit_id: &str,
    records: &[AttendanceRecord],
    evaluator: &SlaEvaluator,
    now: DateTime<Utc>,
) -> UnitAnalytics {
    UnitAnalytics {
        health_unit_id: health_unit_id.to_string(),
        general_weighted_wait_minutes: general_weighted_wait(records, now),
        queue_snapshot: snapshot(records),
        risk_performance: evaluator.evaluate(records, now),
    }
}

/// Queue size and truncated mean entry-to-discharge minutes
pub fn basic_metrics(
    health_unit_id: &str,
    active: &[AttendanceRecord],
    discharged: &[AttendanceRecord],
) -> UnitMetrics {
    let stays: Vec<i64> = discharged
        .iter()
        .filter(|r| r.is_discharged())
        .filter_map(AttendanceRecord::total_stay_minutes)
        .collect();
    let average_minutes = if stays.is_empty() {
        0
    } else {
        (stays.iter().sum::<i64>() as f64 / stays.len() as f64) as i64
    };

    UnitMetrics {
        health_unit_id: health_unit_id.to_string(),
        queue_size: active.len() as u64,
        average_minutes,
    }
}
