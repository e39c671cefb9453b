//! Configuration Loader
//!
//! Layers defaults, an optional configuration file and `LIVEOPS__*`
//! environment variables with the `config` crate, then validates the result.

use super::error::ConfigResult;
use super::LiveOpsConfig;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const DEFAULT_CONFIG_BASENAME: &str = "config/liveops";
const CONFIG_PATH_VAR: &str = "LIVEOPS_CONFIG_PATH";
const ENV_PREFIX: &str = "LIVEOPS";
const ENV_SEPARATOR: &str = "__";

/// Loaded and validated configuration
#[derive(Debug)]
pub struct ConfigManager {
    config: LiveOpsConfig,
    environment: String,
    source_file: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        let path = env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::load_with_env(path.as_deref(), None)
    }

    /// Load configuration from an explicit file (required when given)
    pub fn load_from_path(path: &Path) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_env(Some(path), None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment. Useful for testing without touching global state.
    pub fn load_with_env(
        path: Option<&Path>,
        env_overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();

        let file_source = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_BASENAME).required(false),
        };

        let env_source = ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env_overrides);

        let config: LiveOpsConfig = ::config::Config::builder()
            .add_source(::config::Config::try_from(&LiveOpsConfig::default())?)
            .add_source(file_source)
            .add_source(env_source)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            environment = %environment,
            source_file = ?path,
            window_hours = config.analytics.window_hours,
            core_pool_size = config.worker_pool.core_pool_size,
            max_pool_size = config.worker_pool.max_pool_size,
            queue_capacity = config.worker_pool.queue_capacity,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment,
            source_file: path.map(Path::to_path_buf),
        }))
    }

    /// Wrap an already-built configuration after validating it
    pub fn from_config(config: LiveOpsConfig) -> ConfigResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: Self::detect_environment(),
            source_file: None,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &LiveOpsConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Configuration as JSON with the database URL masked
    pub fn debug_config(&self) -> serde_json::Value {
        let mut value = serde_json::json!(self.config);
        if let Some(url) = value.pointer_mut("/database/url") {
            if !url.is_null() {
                *url = serde_json::Value::String("[MASKED]".to_string());
            }
        }
        value
    }

    /// Detect the current environment
    pub fn detect_environment() -> String {
        crate::logging::get_environment()
    }
}
