//! # Live Operations Configuration
//!
//! Typed configuration for the analytics window, the batch worker pool and
//! the optional PostgreSQL store.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults ([`LiveOpsConfig::default`])
//! 2. Optional file `config/liveops.{toml,yaml,json}`, or the path in
//!    `LIVEOPS_CONFIG_PATH`
//! 3. Environment variables `LIVEOPS__<SECTION>__<KEY>`, e.g.
//!    `LIVEOPS__ANALYTICS__WINDOW_HOURS=6`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use liveops_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let window = manager.config().analytics.window()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::system;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LiveOpsConfig {
    /// Queue analytics settings
    pub analytics: AnalyticsConfig,

    /// Bounded pool used for multi-unit analytics
    pub worker_pool: WorkerPoolConfig,

    /// PostgreSQL store settings
    pub database: DatabaseConfig,
}

/// Queue analytics settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trailing window of entry times considered "current"
    pub window_hours: i64,
    /// Extra tolerance added to the RED tier limit
    pub red_grace_minutes: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_hours: system::DEFAULT_WINDOW_HOURS,
            red_grace_minutes: system::DEFAULT_RED_GRACE_MINUTES,
        }
    }
}

impl AnalyticsConfig {
    /// Window length and grace must be usable for date arithmetic
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window_hours <= 0 || self.window_hours > system::MAX_WINDOW_HOURS {
            return Err(ConfigurationError::invalid_value(
                "analytics.window_hours",
                self.window_hours,
                format!("must be between 1 and {}", system::MAX_WINDOW_HOURS),
            ));
        }

        if self.red_grace_minutes < 0 {
            return Err(ConfigurationError::invalid_value(
                "analytics.red_grace_minutes",
                self.red_grace_minutes,
                "must not be negative",
            ));
        }

        Ok(())
    }

    pub fn window(&self) -> ConfigResult<TimeDelta> {
        TimeDelta::try_hours(self.window_hours).ok_or_else(|| {
            ConfigurationError::invalid_value(
                "analytics.window_hours",
                self.window_hours,
                "does not fit in a duration",
            )
        })
    }

    /// Entries at or before the returned instant fall outside the window
    pub fn window_cutoff(&self, now: DateTime<Utc>) -> ConfigResult<DateTime<Utc>> {
        self.validate()?;
        let window = self.window()?;
        now.checked_sub_signed(window).ok_or_else(|| {
            ConfigurationError::invalid_value(
                "analytics.window_hours",
                self.window_hours,
                format!("reaches before the earliest representable time from {now}"),
            )
        })
    }
}

/// Bounded worker pool settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerPoolConfig {
    /// Workers always available to admitted tasks
    pub core_pool_size: usize,
    /// Hard cap on concurrently running tasks
    pub max_pool_size: usize,
    /// Tasks that may wait for a core worker before bursting
    pub queue_capacity: usize,
    /// Prefix for worker span names
    pub thread_name_prefix: String,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            core_pool_size: system::DEFAULT_CORE_POOL_SIZE,
            max_pool_size: system::DEFAULT_MAX_POOL_SIZE,
            queue_capacity: system::DEFAULT_QUEUE_CAPACITY,
            thread_name_prefix: system::DEFAULT_THREAD_NAME_PREFIX.to_string(),
        }
    }
}

impl WorkerPoolConfig {
    /// Tasks admitted at once before submissions are rejected
    pub fn admission_capacity(&self) -> usize {
        self.max_pool_size + self.queue_capacity
    }
}

/// PostgreSQL store settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: system::DEFAULT_MAX_DB_CONNECTIONS,
        }
    }
}

impl LiveOpsConfig {
    /// Reject values the analytics engine or the pool cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        self.analytics.validate()?;

        let pool = &self.worker_pool;
        if pool.core_pool_size == 0 {
            return Err(ConfigurationError::invalid_value(
                "worker_pool.core_pool_size",
                pool.core_pool_size,
                "must be greater than 0",
            ));
        }

        if pool.core_pool_size > pool.max_pool_size {
            return Err(ConfigurationError::validation_error(format!(
                "worker_pool.core_pool_size ({}) exceeds worker_pool.max_pool_size ({})",
                pool.core_pool_size, pool.max_pool_size
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_connections",
                self.database.max_connections,
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}
