//! Queue snapshot calculator.

use super::types::LiveQueueSnapshot;
use crate::models::AttendanceRecord;
use crate::state_machine::AttendanceStatus;

/// Count the live queue: everything not discharged, split by status
pub fn snapshot<'a, I>(records: I) -> LiveQueueSnapshot
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .fold(LiveQueueSnapshot::default(), |mut acc, record| {
            match record.status {
                AttendanceStatus::Waiting => {
                    acc.total += 1;
                    acc.waiting_count += 1;
                }
                AttendanceStatus::InProgress => {
                    acc.total += 1;
                    acc.in_progress_count += 1;
                }
                AttendanceStatus::Discharged => {}
            }
            acc
        })
}
