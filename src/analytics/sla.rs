//! # Risk-Tier SLA Evaluator
//!
//! Evaluates every risk tier, in priority order, against its wait threshold.
//! A tier is breached when its weighted average exceeds the limit, or when a
//! single patient still waiting has already exceeded it. RED gets a grace
//! buffer on top of its nominal threshold; the reported limit is always the
//! nominal one.

use chrono::{DateTime, Utc};

use super::types::RiskAttendancePerformance;
use super::weighted_wait::weighted_average;
use crate::models::{AttendanceRecord, RiskClassification};

pub use crate::constants::system::DEFAULT_RED_GRACE_MINUTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaEvaluator {
    red_grace_minutes: i64,
}

impl Default for SlaEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_RED_GRACE_MINUTES)
    }
}

impl SlaEvaluator {
    pub fn new(red_grace_minutes: i64) -> Self {
        Self { red_grace_minutes }
    }

    /// Threshold a tier is actually held to
    pub fn effective_limit(&self, risk: RiskClassification) -> i64 {
        match risk {
            RiskClassification::Red => risk.max_wait_minutes() + self.red_grace_minutes,
            _ => risk.max_wait_minutes(),
        }
    }

    /// One entry per tier, RED first, whatever the input holds
    pub fn evaluate(
        &self,
        records: &[AttendanceRecord],
        now: DateTime<Utc>,
    ) -> Vec<RiskAttendancePerformance> {
        RiskClassification::ALL
            .iter()
            .map(|&risk| {
                let tier_records: Vec<&AttendanceRecord> = records
                    .iter()
                    .filter(|r| r.risk_classification == risk)
                    .collect();
                self.evaluate_tier(risk, &tier_records, now)
            })
            .collect()
    }

    pub fn evaluate_tier(
        &self,
        risk: RiskClassification,
        tier_records: &[&AttendanceRecord],
        now: DateTime<Utc>,
    ) -> RiskAttendancePerformance {
        if tier_records.is_empty() {
            return RiskAttendancePerformance::empty(risk);
        }

        let limit = self.effective_limit(risk);
        let average = weighted_average(tier_records.iter().copied(), now);

        let average_breached = average > limit;
        let live_breached = tier_records
            .iter()
            .any(|r| r.is_waiting() && r.effective_wait_minutes(now) > limit);

        RiskAttendancePerformance {
            risk,
            weighted_avg_wait_minutes: average,
            max_wait_limit_minutes: risk.max_wait_minutes(),
            sla_breached: average_breached || live_breached,
        }
    }
}
