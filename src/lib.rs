#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # LiveOps Core
//!
//! Attendance lifecycle and risk-weighted queue analytics for health units.
//!
//! ## Overview
//!
//! Patients enter a unit's queue through triage, are served, and are
//! discharged. This crate owns the two parts of that flow with real logic:
//!
//! - the **attendance lifecycle**, a one-way state machine
//!   (`WAITING -> IN_PROGRESS -> DISCHARGED`) enforced by a transition table
//! - the **queue analytics engine**: live-queue counts, a time-decayed
//!   weighted wait that keeps stale outliers from dominating, per-risk-tier
//!   SLA evaluation, and concurrent multi-unit aggregation on a bounded pool
//!
//! HTTP routing, authentication and seeding live outside; the boundary layer
//! calls the services and maps [`LiveOpsError`] to its own responses.
//!
//! ## Module Organization
//!
//! - [`models`] - Attendance records, patients and the risk tier table
//! - [`state_machine`] - Statuses, lifecycle events and the transition guard
//! - [`store`] - Record store seam with in-memory and PostgreSQL adapters
//! - [`analytics`] - Snapshot, weighted wait and SLA calculators
//! - [`execution`] - Bounded worker pool for batch analytics
//! - [`services`] - Attendance and analytics services
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use liveops_core::config::ConfigManager;
//! use liveops_core::models::RiskClassification;
//! use liveops_core::services::{AnalyticsService, AttendanceService};
//! use liveops_core::store::InMemoryAttendanceStore;
//! use liveops_core::validation::TriageRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! liveops_core::logging::init_structured_logging();
//! let manager = ConfigManager::load()?;
//! let store = Arc::new(InMemoryAttendanceStore::new());
//!
//! let attendance = AttendanceService::new(store.clone());
//! let analytics = AnalyticsService::new(
//!     store,
//!     manager.config().analytics.clone(),
//!     manager.config().worker_pool.clone(),
//! )?;
//!
//! let request = TriageRequest::new("unit-1", "Maria", "123", RiskClassification::Yellow);
//! attendance.start_triage(&request).await?;
//!
//! let report = analytics.get_analytics("unit-1").await?;
//! println!("waiting: {}", report.queue_snapshot.waiting_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests
//! ```

pub mod analytics;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod execution;
pub mod logging;
pub mod models;
pub mod services;
pub mod state_machine;
pub mod store;
pub mod validation;

pub use analytics::{
    LiveQueueSnapshot, RiskAttendancePerformance, SlaEvaluator, UnitAnalytics, UnitMetrics,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigManager, LiveOpsConfig};
pub use constants::{status_groups, system};
pub use error::{LiveOpsError, LiveOpsResult};
pub use execution::{AnalyticsWorkerPool, WorkerPoolError};
pub use models::{AttendanceRecord, NewAttendance, Patient, RiskClassification};
pub use services::{AnalyticsService, AttendanceService};
pub use state_machine::{AttendanceEvent, AttendanceStatus, TransitionGuard};
pub use store::{AttendanceStore, InMemoryAttendanceStore, PgAttendanceStore, StoreError};
pub use validation::TriageRequest;
