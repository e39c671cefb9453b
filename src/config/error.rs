//! Configuration Error Types
//!
//! Error handling for configuration loading and validation.

use thiserror::Error;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Source could not be read or parsed by the config builder
    #[error("Failed to load configuration: {error}")]
    LoadError { error: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },

    /// Configuration validation errors
    #[error("Configuration validation failed: {error}")]
    ValidationError { error: String },
}

impl ConfigurationError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl ToString,
        context: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            context: context.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(error: impl Into<String>) -> Self {
        Self::ValidationError {
            error: error.into(),
        }
    }
}

impl From<::config::ConfigError> for ConfigurationError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::LoadError {
            error: err.to_string(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;
