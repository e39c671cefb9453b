//! # Bounded Analytics Worker Pool
//!
//! Runs per-unit analytics tasks with a fixed core size, a capped maximum
//! size and a bounded queue. Saturation is reported to the submitter instead
//! of blocking it.
//!
//! ## Admission
//!
//! The pool admits at most `max_pool_size + queue_capacity` tasks at once. A
//! batch reserves one admission slot per task before anything is spawned; if
//! any slot is missing the reservations are released and the whole batch is
//! rejected.
//!
//! ## Scheduling
//!
//! Admitted tasks run on up to `core_pool_size` core workers. Tasks that find
//! every core worker busy wait in the queue; once the queue holds
//! `queue_capacity` tasks, further tasks run on burst workers, up to
//! `max_pool_size - core_pool_size` of them.
//!
//! A burst worker that finishes while tasks are queued stays alive and hands
//! itself to the queue, so queued tasks are served by whichever worker frees
//! up first. An idle burst worker left behind by that handoff is reused by
//! the next task that would otherwise queue or burst.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};

use crate::config::WorkerPoolConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkerPoolError {
    #[error("Worker pool saturated: {requested} task(s) requested, {available} slot(s) available")]
    Rejected { requested: usize, available: usize },

    #[error("Worker pool is closed")]
    Closed,

    #[error("Invalid worker pool configuration: {0}")]
    InvalidConfiguration(String),
}

/// Point-in-time usage figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPoolStats {
    pub active_workers: usize,
    pub queued_tasks: usize,
    pub available_slots: usize,
    pub admission_capacity: usize,
}

#[derive(Debug)]
struct PoolInner {
    config: WorkerPoolConfig,
    admission: Arc<Semaphore>,
    core: Arc<Semaphore>,
    burst: Semaphore,
    /// Burst workers released to queued tasks
    handoff: Semaphore,
    queued: AtomicUsize,
    sequence: AtomicU64,
}

/// Bounded pool that rejects on saturation
#[derive(Debug, Clone)]
pub struct AnalyticsWorkerPool {
    inner: Arc<PoolInner>,
}

impl AnalyticsWorkerPool {
    pub fn new(config: WorkerPoolConfig) -> Result<Self, WorkerPoolError> {
        if config.core_pool_size == 0 {
            return Err(WorkerPoolError::InvalidConfiguration(
                "core_pool_size must be greater than 0".to_string(),
            ));
        }
        if config.core_pool_size > config.max_pool_size {
            return Err(WorkerPoolError::InvalidConfiguration(format!(
                "core_pool_size ({}) exceeds max_pool_size ({})",
                config.core_pool_size, config.max_pool_size
            )));
        }

        let inner = PoolInner {
            admission: Arc::new(Semaphore::new(config.admission_capacity())),
            core: Arc::new(Semaphore::new(config.core_pool_size)),
            burst: Semaphore::new(config.max_pool_size - config.core_pool_size),
            handoff: Semaphore::new(0),
            queued: AtomicUsize::new(0),
            sequence: AtomicU64::new(0),
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn config(&self) -> &WorkerPoolConfig {
        &self.inner.config
    }

    /// Reserve a slot for every job, then spawn them all.
    ///
    /// Handles are returned in submission order.
    pub fn submit_batch<F, T>(&self, jobs: Vec<F>) -> Result<Vec<JoinHandle<T>>, WorkerPoolError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let requested = jobs.len();
        let mut slots = Vec::with_capacity(requested);

        for _ in 0..requested {
            match self.inner.admission.clone().try_acquire_owned() {
                Ok(slot) => slots.push(slot),
                Err(TryAcquireError::Closed) => return Err(WorkerPoolError::Closed),
                Err(TryAcquireError::NoPermits) => {
                    let available = slots.len() + self.inner.admission.available_permits();
                    warn!(
                        requested = requested,
                        available = available,
                        "Worker pool saturated, rejecting batch"
                    );
                    return Err(WorkerPoolError::Rejected {
                        requested,
                        available,
                    });
                }
            }
        }

        debug!(tasks = requested, "Batch admitted to worker pool");

        let handles = jobs
            .into_iter()
            .zip(slots)
            .map(|(job, slot)| self.spawn_admitted(job, slot))
            .collect();

        Ok(handles)
    }

    fn spawn_admitted<F, T>(&self, job: F, slot: OwnedSemaphorePermit) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let sequence = inner.sequence.fetch_add(1, Ordering::Relaxed);
        let span = tracing::debug_span!(
            "analytics_task",
            worker = %format!("{}{}", inner.config.thread_name_prefix, sequence)
        );

        tokio::spawn(
            async move {
                let _slot = slot;
                // A closed pool still runs what it already admitted
                let _worker = inner.acquire_worker().await;
                job.await
            }
            .instrument(span),
        )
    }

    /// Stop admitting new batches
    pub fn close(&self) {
        self.inner.admission.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.admission.is_closed()
    }

    pub fn stats(&self) -> WorkerPoolStats {
        let config = &self.inner.config;
        let burst_capacity = config.max_pool_size - config.core_pool_size;
        let active_workers = config
            .core_pool_size
            .saturating_sub(self.inner.core.available_permits())
            + burst_capacity.saturating_sub(
                self.inner.burst.available_permits() + self.inner.handoff.available_permits(),
            );

        WorkerPoolStats {
            active_workers,
            queued_tasks: self.inner.queued.load(Ordering::SeqCst),
            available_slots: self.inner.admission.available_permits(),
            admission_capacity: config.admission_capacity(),
        }
    }
}

/// Worker held by a running task, returned to its pool on drop
struct WorkerLease {
    _core: Option<OwnedSemaphorePermit>,
    burst_pool: Option<Arc<PoolInner>>,
}

impl Drop for WorkerLease {
    fn drop(&mut self) {
        if let Some(inner) = self.burst_pool.take() {
            inner.release_burst();
        }
    }
}

impl PoolInner {
    async fn acquire_worker(self: &Arc<Self>) -> Option<WorkerLease> {
        if let Ok(worker) = self.core.clone().try_acquire_owned() {
            return Some(Self::core_lease(worker));
        }

        let waiting = self.queued.fetch_add(1, Ordering::SeqCst) + 1;
        let lease = if waiting > self.config.queue_capacity && self.try_take_burst() {
            Some(self.burst_lease())
        } else {
            tokio::select! {
                core = self.core.clone().acquire_owned() => core.ok().map(Self::core_lease),
                handoff = self.handoff.acquire() => handoff.ok().map(|worker| {
                    worker.forget();
                    self.burst_lease()
                }),
            }
        };
        self.queued.fetch_sub(1, Ordering::SeqCst);

        lease
    }

    fn core_lease(worker: OwnedSemaphorePermit) -> WorkerLease {
        WorkerLease {
            _core: Some(worker),
            burst_pool: None,
        }
    }

    fn burst_lease(self: &Arc<Self>) -> WorkerLease {
        WorkerLease {
            _core: None,
            burst_pool: Some(Arc::clone(self)),
        }
    }

    /// Idle handed-off workers first, then fresh burst capacity
    fn try_take_burst(&self) -> bool {
        let worker = self
            .handoff
            .try_acquire()
            .or_else(|_| self.burst.try_acquire());
        match worker {
            Ok(worker) => {
                worker.forget();
                true
            }
            Err(_) => false,
        }
    }

    fn release_burst(&self) {
        if self.queued.load(Ordering::SeqCst) > 0 {
            self.handoff.add_permits(1);
        } else {
            self.burst.add_permits(1);
        }
    }
}
