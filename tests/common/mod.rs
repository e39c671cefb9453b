#![allow(dead_code)]

pub mod builders;
pub mod stores;
pub mod strategies;

pub use builders::*;
pub use stores::*;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use liveops_core::clock::FixedClock;
use liveops_core::config::{AnalyticsConfig, WorkerPoolConfig};
use liveops_core::execution::AnalyticsWorkerPool;
use liveops_core::services::{AnalyticsService, AttendanceService};
use liveops_core::store::{AttendanceStore, InMemoryAttendanceStore};

/// Fixed reference instant shared by fixtures
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 14, 0, 0).unwrap()
}

/// Services wired to one in-memory store and one pinned clock
pub struct TestHarness {
    pub store: Arc<InMemoryAttendanceStore>,
    pub clock: Arc<FixedClock>,
    pub attendance: AttendanceService,
    pub analytics: AnalyticsService,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_pool(WorkerPoolConfig::default())
    }

    pub fn with_pool(pool_config: WorkerPoolConfig) -> Self {
        let store = Arc::new(InMemoryAttendanceStore::new());
        let clock = Arc::new(FixedClock::new(reference_now()));
        let attendance = AttendanceService::with_clock(store.clone(), clock.clone());
        let analytics = analytics_service(store.clone(), clock.clone(), pool_config);

        Self {
            store,
            clock,
            attendance,
            analytics,
        }
    }
}

pub fn analytics_service(
    store: Arc<dyn AttendanceStore>,
    clock: Arc<FixedClock>,
    pool_config: WorkerPoolConfig,
) -> AnalyticsService {
    let pool = AnalyticsWorkerPool::new(pool_config).unwrap();
    AnalyticsService::with_parts(store, clock, pool, AnalyticsConfig::default())
}

pub fn pool_config(core: usize, max: usize, queue: usize) -> WorkerPoolConfig {
    WorkerPoolConfig {
        core_pool_size: core,
        max_pool_size: max,
        queue_capacity: queue,
        thread_name_prefix: "it-".to_string(),
    }
}
