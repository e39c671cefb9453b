//! # PostgreSQL Attendance Store
//!
//! Maps [`AttendanceRecord`] to the `attendances` table. The embedded patient
//! is flattened into `patient_name`/`patient_document`; tiers and statuses are
//! stored by their upper-case names.
//!
//! ```sql
//! CREATE TABLE attendances (
//!   id UUID PRIMARY KEY,
//!   health_unit_id TEXT NOT NULL,
//!   patient_name TEXT NOT NULL,
//!   patient_document TEXT NOT NULL,
//!   risk_classification TEXT NOT NULL,
//!   status TEXT NOT NULL,
//!   entry_time TIMESTAMPTZ NOT NULL,
//!   start_time TIMESTAMPTZ,
//!   discharge_time TIMESTAMPTZ
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{AttendanceStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;
use crate::models::{AttendanceRecord, NewAttendance, Patient};
use crate::state_machine::AttendanceStatus;

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS attendances (
        id UUID PRIMARY KEY,
        health_unit_id TEXT NOT NULL,
        patient_name TEXT NOT NULL,
        patient_document TEXT NOT NULL,
        risk_classification TEXT NOT NULL,
        status TEXT NOT NULL,
        entry_time TIMESTAMPTZ NOT NULL,
        start_time TIMESTAMPTZ,
        discharge_time TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendances_unit_entry ON attendances (health_unit_id, entry_time)",
    "CREATE INDEX IF NOT EXISTS idx_attendances_unit_status ON attendances (health_unit_id, status)",
];

const SELECT_COLUMNS: &str = "SELECT id, health_unit_id, patient_name, patient_document, \
     risk_classification, status, entry_time, start_time, discharge_time FROM attendances";

/// Row shape of the `attendances` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AttendanceRow {
    pub id: Uuid,
    pub health_unit_id: String,
    pub patient_name: String,
    pub patient_document: String,
    pub risk_classification: String,
    pub status: String,
    pub entry_time: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub discharge_time: Option<DateTime<Utc>>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let risk_classification =
            row.risk_classification
                .parse()
                .map_err(|_| StoreError::Decode {
                    field: "risk_classification".to_string(),
                    value: row.risk_classification.clone(),
                })?;
        let status = row.status.parse().map_err(|_| StoreError::Decode {
            field: "status".to_string(),
            value: row.status.clone(),
        })?;

        Ok(AttendanceRecord {
            id: row.id,
            health_unit_id: row.health_unit_id,
            patient: Patient {
                name: row.patient_name,
                document: row.patient_document,
            },
            risk_classification,
            status,
            entry_time: row.entry_time,
            start_time: row.start_time,
            discharge_time: row.discharge_time,
        })
    }
}

fn decode_rows(rows: Vec<AttendanceRow>) -> StoreResult<Vec<AttendanceRecord>> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

/// sqlx-backed implementation of [`AttendanceStore`]
#[derive(Debug, Clone)]
pub struct PgAttendanceStore {
    pool: PgPool,
}

impl PgAttendanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("database.url is not configured".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Connected attendance store to PostgreSQL"
        );

        Ok(Self::new(pool))
    }

    /// Create the table and its query indexes if missing
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Attendance schema ensured");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn upsert(&self, record: &AttendanceRecord) -> StoreResult<AttendanceRecord> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            INSERT INTO attendances (
                id, health_unit_id, patient_name, patient_document,
                risk_classification, status, entry_time, start_time, discharge_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                start_time = EXCLUDED.start_time,
                discharge_time = EXCLUDED.discharge_time
            RETURNING id, health_unit_id, patient_name, patient_document,
                      risk_classification, status, entry_time, start_time, discharge_time
            "#,
        )
        .bind(record.id)
        .bind(&record.health_unit_id)
        .bind(&record.patient.name)
        .bind(&record.patient.document)
        .bind(record.risk_classification.as_str())
        .bind(record.status.as_str())
        .bind(record.entry_time)
        .bind(record.start_time)
        .bind(record.discharge_time)
        .fetch_one(&self.pool)
        .await?;

        AttendanceRecord::try_from(row)
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn insert(&self, new_attendance: NewAttendance) -> StoreResult<AttendanceRecord> {
        let record = new_attendance.into_record(Uuid::new_v4());
        self.upsert(&record).await
    }

    async fn save(&self, record: &AttendanceRecord) -> StoreResult<AttendanceRecord> {
        self.upsert(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn find_by_unit(&self, health_unit_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE health_unit_id = $1 ORDER BY entry_time");
        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(health_unit_id)
            .fetch_all(&self.pool)
            .await?;

        decode_rows(rows)
    }

    async fn find_by_unit_and_status(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE health_unit_id = $1 AND status = $2 ORDER BY entry_time"
        );
        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(health_unit_id)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        decode_rows(rows)
    }

    async fn find_by_unit_and_status_not(
        &self,
        health_unit_id: &str,
        status: AttendanceStatus,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE health_unit_id = $1 AND status <> $2 ORDER BY entry_time"
        );
        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(health_unit_id)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        decode_rows(rows)
    }

    async fn find_by_unit_with_entry_after(
        &self,
        health_unit_id: &str,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE health_unit_id = $1 AND entry_time > $2 ORDER BY entry_time"
        );
        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(health_unit_id)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;

        decode_rows(rows)
    }

    fn store_name(&self) -> &'static str {
        "postgres"
    }
}
