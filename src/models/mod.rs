//! # Models
//!
//! Data layer of the attendance core.
//!
//! - [`AttendanceRecord`]: one patient visit to one health unit
//! - [`RiskClassification`]: the five fixed triage tiers and their SLA table

pub mod attendance;
pub mod risk_classification;

pub use attendance::{AttendanceRecord, NewAttendance, Patient};
pub use risk_classification::{RiskClassification, RiskTier, RISK_TIERS};
