//! # Structured Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem.
//! Logs go to stdout; set `LIVEOPS_LOG_FORMAT=json` for one JSON object per
//! line. `RUST_LOG` overrides the per-environment default level.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let use_ansi = std::io::stdout().is_terminal();

        let layer = if json_format_requested() {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_current_span(true)
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
                .with_filter(filter)
                .boxed()
        };

        // Embedding applications may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            pid = std::process::id(),
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
pub fn get_environment() -> String {
    std::env::var("LIVEOPS_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

fn json_format_requested() -> bool {
    std::env::var("LIVEOPS_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
