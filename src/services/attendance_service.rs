//! # Attendance Service
//!
//! Intake and lifecycle operations over the record store:
//!
//! ```text
//! caller -> AttendanceService -> TransitionGuard -> AttendanceStore
//! ```
//!
//! ## Concurrent status changes
//!
//! A status change is a read-modify-write. Within one process the service
//! holds a per-record async lock around it, so two racing requests for the
//! same id are applied one after the other and each is checked against the
//! state the other left behind. Writers in other processes are not
//! coordinated; the store stays last-write-wins across processes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::constants::events;
use crate::error::{LiveOpsError, LiveOpsResult};
use crate::models::AttendanceRecord;
use crate::state_machine::{AttendanceEvent, AttendanceStatus, TransitionGuard};
use crate::store::AttendanceStore;
use crate::validation::{validate_triage_request, TriageRequest};

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
    record_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for AttendanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceService")
            .field("store", &self.store.store_name())
            .field("clock", &self.clock)
            .field("locked_records", &self.record_locks.len())
            .finish()
    }
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            record_locks: Arc::new(DashMap::new()),
        }
    }

    /// Create a `WAITING` record with `entry_time = now`
    pub async fn start_triage(&self, request: &TriageRequest) -> LiveOpsResult<AttendanceRecord> {
        let new_attendance = validate_triage_request(request, self.clock.now())?;

        info!(
            health_unit_id = %new_attendance.health_unit_id,
            risk = %new_attendance.risk_classification,
            "Starting triage"
        );

        let record = self.store.insert(new_attendance).await?;

        debug!(
            attendance_id = %record.id,
            event = events::ATTENDANCE_CREATED,
            "Attendance created"
        );
        Ok(record)
    }

    pub async fn get_attendance_by_id(&self, id: Uuid) -> LiveOpsResult<AttendanceRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(LiveOpsError::NotFound { id })
    }

    /// Every record of the unit, any status
    pub async fn list_by_health_unit(
        &self,
        health_unit_id: &str,
    ) -> LiveOpsResult<Vec<AttendanceRecord>> {
        Ok(self.store.find_by_unit(health_unit_id).await?)
    }

    /// Move a record to `requested` through the transition table and persist it
    pub async fn update_status(
        &self,
        id: Uuid,
        requested: AttendanceStatus,
    ) -> LiveOpsResult<AttendanceRecord> {
        info!(attendance_id = %id, to = %requested, "Updating attendance status");

        let lock = self.record_lock(id);
        let result = {
            let _guard = lock.lock().await;
            self.transition_locked(id, requested).await
        };
        drop(lock);
        self.release_record_lock(id);

        result
    }

    /// Same as [`update_status`](Self::update_status), expressed as a lifecycle event
    pub async fn apply_event(
        &self,
        id: Uuid,
        event: AttendanceEvent,
    ) -> LiveOpsResult<AttendanceRecord> {
        debug!(attendance_id = %id, event = event.event_type(), "Applying lifecycle event");
        self.update_status(id, event.requested_status()).await
    }

    async fn transition_locked(
        &self,
        id: Uuid,
        requested: AttendanceStatus,
    ) -> LiveOpsResult<AttendanceRecord> {
        let current = self.get_attendance_by_id(id).await?;

        let updated = TransitionGuard::apply(&current, requested, self.clock.now()).map_err(|e| {
            warn!(
                attendance_id = %id,
                from = %current.status,
                to = %requested,
                "Rejected status transition"
            );
            LiveOpsError::from(e)
        })?;

        let saved = self.store.save(&updated).await?;

        info!(
            attendance_id = %id,
            health_unit_id = %saved.health_unit_id,
            from = %current.status,
            to = %saved.status,
            event = events::for_status(saved.status),
            "Attendance status updated"
        );
        Ok(saved)
    }

    fn record_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
        Arc::clone(self.record_locks.entry(id).or_default().value())
    }

    /// Drop the lock entry once nobody else holds or awaits it
    fn release_record_lock(&self, id: Uuid) {
        self.record_locks
            .remove_if(&id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
