mod attendance_lifecycle;
mod batch_analytics;
