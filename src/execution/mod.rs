//! Execution primitives for fan-out work.

pub mod worker_pool;

pub use worker_pool::{AnalyticsWorkerPool, WorkerPoolError, WorkerPoolStats};
