//! Service layer exposed to the boundary layer.
//!
//! - [`AttendanceService`]: intake, lookup and status changes
//! - [`AnalyticsService`]: single-unit and batch queue analytics

pub mod analytics_service;
pub mod attendance_service;

pub use analytics_service::AnalyticsService;
pub use attendance_service::AttendanceService;
