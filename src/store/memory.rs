//! In-memory attendance store backed by a concurrent map.
//!
//! Used for embedded deployments and tests. Query results are sorted by entry
//! time so callers see a stable order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use super::{AttendanceStore, StoreResult};
use crate::models::{AttendanceRecord, NewAttendance};
use crate::state_machine::AttendanceStatus;

#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    records: DashMap<Uuid, AttendanceRecord>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Store a fully-formed record as is (fixtures, imports)
    pub fn put(&self, record: AttendanceRecord) {
        self.records.insert(record.id, record);
    }

    fn collect_where<F>(&self, predicate: F) -> Vec<AttendanceRecord>
    where
        F: Fn(&AttendanceRecord) -> bool,
    {
        let mut matches: Vec<AttendanceRecord> = self
            .records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|record| (record.entry_time, record.id));
        matches
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn insert(&self, new_attendance: NewAttendance) -> StoreResult<AttendanceRecord> {
        let record = new_attendance.into_record(Uuid::new_v4());
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save(&self, record: &AttendanceRecord) -> StoreResult<AttendanceRecord> {
        self.records.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_unit(&self, health_unit_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.health_unit_id == health_unit_id))
    }

    async fn find_by_unit_and_status(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.health_unit_id == health_unit_id && r.status == status))
    }

    async fn find_by_unit_and_status_not(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.health_unit_id == health_unit_id && r.status != status))
    }

    async fn find_by_unit_with_entry_after(
        &self,
        health_unit_id: &str,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self.collect_where(|r| r.health_unit_id == health_unit_id && r.entry_time > cutoff))
    }

    fn store_name(&self) -> &'static str {
        "in_memory"
    }
}
