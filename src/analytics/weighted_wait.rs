//! # Weighted Wait-Time Estimator
//!
//! Summarizes the waits of a population as one number that favors recent
//! experience, so a single hours-old outlier cannot dominate a live figure.
//!
//! Each record contributes its effective wait (entry to start, or entry to
//! `now` while still queued) with a weight:
//!
//! - `WAITING` records weigh `1.0`; their wait is still growing.
//! - Everything else decays hyperbolically from its reference time
//!   (start, else discharge, else `now`): `1 / (1 + hours_ago)`. One hour
//!   ago weighs 0.5, three hours ago 0.25.
//!
//! The average is `Σ(wait * weight) / Σweight`, truncated to whole minutes,
//! and `0` for an empty population.

use chrono::{DateTime, Utc};

use crate::models::AttendanceRecord;

/// Decay weight of a single record at `now`
pub fn weight(record: &AttendanceRecord, now: DateTime<Utc>) -> f64 {
    if record.is_waiting() {
        return 1.0;
    }

    let reference = record
        .start_time
        .or(record.discharge_time)
        .unwrap_or(now);
    decay_weight((now - reference).num_minutes())
}

/// `1 / (1 + minutes/60)`; references in the future count as "just now"
pub fn decay_weight(minutes_ago: i64) -> f64 {
    let hours_ago = minutes_ago.max(0) as f64 / 60.0;
    1.0 / (1.0 + hours_ago)
}

/// Weighted average of effective waits, truncated to whole minutes
pub fn weighted_average<'a, I>(records: I, now: DateTime<Utc>) -> i64
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let (weighted_total, weight_total) =
        records
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(weighted, weights), record| {
                let w = weight(record, now);
                let wait = record.effective_wait_minutes(now) as f64;
                (weighted + wait * w, weights + w)
            });

    if weight_total == 0.0 {
        return 0;
    }
    (weighted_total / weight_total) as i64
}

/// Unit-wide weighted wait over records that have already started
pub fn general_weighted_wait(records: &[AttendanceRecord], now: DateTime<Utc>) -> i64 {
    weighted_average(records.iter().filter(|r| r.has_started()), now)
}
