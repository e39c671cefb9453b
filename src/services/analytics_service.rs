//! # Analytics Service
//!
//! Fetches a unit's trailing window from the store and runs it through the
//! snapshot, weighted-wait and SLA calculators. Multi-unit requests fan out
//! one task per unit on the bounded [`AnalyticsWorkerPool`] and join the
//! results back in request order.
//!
//! ```text
//! ["A", "B", "C"] -> pool: [task A, task B, task C] -> join_all -> [A, B, C]
//! ```
//!
//! Units share no state, so one unit's failure cannot corrupt another's
//! result; the batch still reports the first failure in request order.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::analytics::{analyze_unit, basic_metrics, SlaEvaluator, UnitAnalytics, UnitMetrics};
use crate::clock::{Clock, SystemClock};
use crate::config::{AnalyticsConfig, WorkerPoolConfig};
use crate::error::{LiveOpsError, LiveOpsResult};
use crate::execution::AnalyticsWorkerPool;
use crate::state_machine::AttendanceStatus;
use crate::store::AttendanceStore;

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
    pool: AnalyticsWorkerPool,
    config: AnalyticsConfig,
    evaluator: SlaEvaluator,
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("store", &self.store.store_name())
            .field("window_hours", &self.config.window_hours)
            .field("pool", &self.pool.stats())
            .finish()
    }
}

impl AnalyticsService {
    /// Build the service with a wall clock and a fresh worker pool
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        config: AnalyticsConfig,
        pool_config: WorkerPoolConfig,
    ) -> LiveOpsResult<Self> {
        config.validate()?;
        let pool = AnalyticsWorkerPool::new(pool_config)?;
        Ok(Self::with_parts(store, Arc::new(SystemClock), pool, config))
    }

    pub fn with_parts(
        store: Arc<dyn AttendanceStore>,
        clock: Arc<dyn Clock>,
        pool: AnalyticsWorkerPool,
        config: AnalyticsConfig,
    ) -> Self {
        let evaluator = SlaEvaluator::new(config.red_grace_minutes);
        Self {
            store,
            clock,
            pool,
            config,
            evaluator,
        }
    }

    pub fn pool(&self) -> &AnalyticsWorkerPool {
        &self.pool
    }

    /// Snapshot, general weighted wait and per-tier SLA over the trailing window
    pub async fn get_analytics(&self, health_unit_id: &str) -> LiveOpsResult<UnitAnalytics> {
        info!(health_unit_id = %health_unit_id, "Generating unit analytics");

        let now = self.clock.now();
        let cutoff = self.config.window_cutoff(now)?;
        let records = self
            .store
            .find_by_unit_with_entry_after(health_unit_id, cutoff)
            .await?;

        let analytics = analyze_unit(health_unit_id, &records, &self.evaluator, now);

        debug!(
            health_unit_id = %health_unit_id,
            records = records.len(),
            queue_total = analytics.queue_snapshot.total,
            general_weighted_wait = analytics.general_weighted_wait_minutes,
            breached_tiers = ?analytics.breached_tiers(),
            "Unit analytics computed"
        );

        Ok(analytics)
    }

    /// Queue size and mean entry-to-discharge minutes, no window applied
    pub async fn get_basic_metrics(&self, health_unit_id: &str) -> LiveOpsResult<UnitMetrics> {
        info!(health_unit_id = %health_unit_id, "Calculating basic unit metrics");

        let active = self
            .store
            .find_by_unit_and_status_not(health_unit_id, AttendanceStatus::Discharged)
            .await?;
        let discharged = self
            .store
            .find_by_unit_and_status(health_unit_id, AttendanceStatus::Discharged)
            .await?;

        Ok(basic_metrics(health_unit_id, &active, &discharged))
    }

    /// Analytics for every unit, in the order given.
    ///
    /// An empty list, or a pool without room for the whole batch, is rejected
    /// before any work is scheduled.
    pub async fn get_analytics_by_units(
        &self,
        health_unit_ids: &[String],
    ) -> LiveOpsResult<Vec<UnitAnalytics>> {
        if health_unit_ids.is_empty() {
            return Err(LiveOpsError::BatchRejected {
                reason: "At least one health unit ID is required".to_string(),
            });
        }

        info!(unit_count = health_unit_ids.len(), "Starting batch analytics");

        let jobs: Vec<_> = health_unit_ids
            .iter()
            .cloned()
            .map(|health_unit_id| {
                let service = self.clone();
                async move { service.get_analytics(&health_unit_id).await }
            })
            .collect();

        let handles = self.pool.submit_batch(jobs).map_err(|e| {
            warn!(unit_count = health_unit_ids.len(), error = %e, "Batch analytics rejected");
            LiveOpsError::from(e)
        })?;

        join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(LiveOpsError::Internal(format!("Analytics task failed: {e}"))),
            })
            .collect()
    }
}
