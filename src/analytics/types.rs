//! Result types produced by the analytics engine.
//!
//! These are the shapes handed to the boundary layer, so they serialize with
//! camelCase field names.

use serde::{Deserialize, Serialize};

use crate::models::RiskClassification;

/// Live-queue count breakdown (discharged records excluded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveQueueSnapshot {
    pub total: u64,
    pub waiting_count: u64,
    pub in_progress_count: u64,
}

/// SLA evaluation of one risk tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAttendancePerformance {
    pub risk: RiskClassification,
    pub weighted_avg_wait_minutes: i64,
    /// Nominal tier threshold, without the RED grace buffer
    pub max_wait_limit_minutes: i64,
    pub sla_breached: bool,
}

impl RiskAttendancePerformance {
    /// Entry for a tier with no records in the window
    pub fn empty(risk: RiskClassification) -> Self {
        Self {
            risk,
            weighted_avg_wait_minutes: 0,
            max_wait_limit_minutes: risk.max_wait_minutes(),
            sla_breached: false,
        }
    }
}

/// Composed analytics of one health unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitAnalytics {
    pub health_unit_id: String,
    pub general_weighted_wait_minutes: i64,
    pub queue_snapshot: LiveQueueSnapshot,
    /// Always one entry per tier, RED first
    pub risk_performance: Vec<RiskAttendancePerformance>,
}

impl UnitAnalytics {
    pub fn breached_tiers(&self) -> Vec<RiskClassification> {
        self.risk_performance
            .iter()
            .filter(|p| p.sla_breached)
            .map(|p| p.risk)
            .collect()
    }

    pub fn has_breach(&self) -> bool {
        self.risk_performance.iter().any(|p| p.sla_breached)
    }
}

/// Legacy unit metrics: queue size and mean entry-to-discharge minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMetrics {
    pub health_unit_id: String,
    pub queue_size: u64,
    pub average_minutes: i64,
}
