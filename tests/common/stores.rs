//! Store wrappers for exercising the services around an in-memory store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liveops_core::models::{AttendanceRecord, NewAttendance};
use liveops_core::state_machine::AttendanceStatus;
use liveops_core::store::{AttendanceStore, StoreError, StoreResult};
use uuid::Uuid;

/// Delays window queries per unit and can fail chosen units
pub struct ScriptedStore {
    inner: Arc<dyn AttendanceStore>,
    delays_ms: Vec<(String, u64)>,
    failing_units: HashSet<String>,
    pub window_queries: AtomicUsize,
    pub saves: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(inner: Arc<dyn AttendanceStore>) -> Self {
        Self {
            inner,
            delays_ms: Vec::new(),
            failing_units: HashSet::new(),
            window_queries: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn delay(mut self, health_unit_id: &str, millis: u64) -> Self {
        self.delays_ms.push((health_unit_id.to_string(), millis));
        self
    }

    pub fn failing(mut self, health_unit_id: &str) -> Self {
        self.failing_units.insert(health_unit_id.to_string());
        self
    }

    pub fn window_query_count(&self) -> usize {
        self.window_queries.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttendanceStore for ScriptedStore {
    async fn insert(&self, new_attendance: NewAttendance) -> StoreResult<AttendanceRecord> {
        self.inner.insert(new_attendance).await
    }

    async fn save(&self, record: &AttendanceRecord) -> StoreResult<AttendanceRecord> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_unit(&self, health_unit_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        self.inner.find_by_unit(health_unit_id).await
    }

    async fn find_by_unit_and_status(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        self.inner
            .find_by_unit_and_status(health_unit_id, status)
            .await
    }

    async fn find_by_unit_and_status_not(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        self.inner
            .find_by_unit_and_status_not(health_unit_id, status)
            .await
    }

    async fn find_by_unit_with_entry_after(
        &self,
        health_unit_id: &str,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        self.window_queries.fetch_add(1, Ordering::SeqCst);

        if let Some((_, millis)) = self.delays_ms.iter().find(|(unit, _)| unit == health_unit_id) {
            tokio::time::sleep(StdDuration::from_millis(*millis)).await;
        }
        if self.failing_units.contains(health_unit_id) {
            return Err(StoreError::Unavailable(format!(
                "scripted failure for {health_unit_id}"
            )));
        }

        self.inner
            .find_by_unit_with_entry_after(health_unit_id, cutoff)
            .await
    }

    fn store_name(&self) -> &'static str {
        "scripted"
    }
}
