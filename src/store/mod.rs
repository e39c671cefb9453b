//! # Record Store Adapter
//!
//! The attendance core never queries storage directly; it goes through
//! [`AttendanceStore`]. The trait exposes exactly the lookups the lifecycle
//! and the analytics engine issue:
//!
//! - point lookup by id
//! - query by unit, by unit and status, by unit and status-not
//! - query by unit with entry time after a cutoff (the trailing window)
//! - insert of a new record (the store assigns the id) and full-record save
//!
//! Reads are plain snapshot reads. `save` is last-write-wins; callers that need
//! read-modify-write consistency serialize around it (see
//! [`AttendanceService`](crate::services::AttendanceService)).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AttendanceRecord, NewAttendance};
use crate::state_machine::AttendanceStatus;

pub use memory::InMemoryAttendanceStore;
pub use postgres::PgAttendanceStore;

/// Errors raised by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid stored value '{value}' for column '{field}'")]
    Decode { field: String, value: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for attendance records
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Persist a new record, assigning its id
    async fn insert(&self, new_attendance: NewAttendance) -> StoreResult<AttendanceRecord>;

    /// Persist the full record, replacing any stored version
    async fn save(&self, record: &AttendanceRecord) -> StoreResult<AttendanceRecord>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>>;

    async fn find_by_unit(&self, health_unit_id: &str) -> StoreResult<Vec<AttendanceRecord>>;

    async fn find_by_unit_and_status(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    async fn find_by_unit_and_status_not(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records of the unit whose entry time is strictly after `cutoff`
    async fn find_by_unit_with_entry_after(
        &self,
        health_unit_id: &str,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Short name for diagnostics
    fn store_name(&self) -> &'static str;
}
