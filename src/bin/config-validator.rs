//! # LiveOps Configuration Validator
//!
//! Loads the layered configuration the same way the services do and reports
//! problems before anything is started.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use liveops_core::config::ConfigManager;
use liveops_core::execution::AnalyticsWorkerPool;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate LiveOps configuration")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file (defaults to config/liveops.* when present)
    #[arg(short, long, env = "LIVEOPS_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every section
    All,

    /// Validate one section (analytics, worker_pool, database)
    Component { name: String },

    /// Print the resolved configuration as JSON, secrets masked
    Show,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .try_init();

    let result = match &cli.command {
        Some(Commands::All) | None => validate_all(&cli),
        Some(Commands::Component { name }) => validate_component(&cli, name),
        Some(Commands::Show) => show_config(&cli),
    };

    match result {
        Ok(()) => {
            info!("Configuration validation completed successfully");
            process::exit(0);
        }
        Err(e) => {
            error!("Configuration validation failed: {e:#}");
            eprintln!("❌ {e:#}");
            process::exit(1);
        }
    }
}

fn load(cli: &Cli) -> anyhow::Result<Arc<ConfigManager>> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::load_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigManager::load().context("loading configuration")?,
    };
    Ok(manager)
}

fn validate_all(cli: &Cli) -> anyhow::Result<()> {
    println!("🔧 Validating LiveOps Configuration");
    let manager = load(cli)?;
    println!("Environment: {}", manager.environment());
    match manager.source_file() {
        Some(path) => println!("Config File: {}", path.display()),
        None => println!("Config File: (defaults and environment only)"),
    }
    println!();

    validate_analytics(&manager)?;
    validate_worker_pool(&manager)?;
    validate_database(&manager)?;

    println!("\n🎉 All configuration validation checks passed!");
    Ok(())
}

fn validate_component(cli: &Cli, name: &str) -> anyhow::Result<()> {
    let manager = load(cli)?;

    match name.to_lowercase().as_str() {
        "analytics" => validate_analytics(&manager)?,
        "worker_pool" | "worker-pool" => validate_worker_pool(&manager)?,
        "database" => validate_database(&manager)?,
        _ => bail!("Unknown component: {name}"),
    }

    println!("✅ Component '{name}' validation passed!");
    Ok(())
}

fn show_config(cli: &Cli) -> anyhow::Result<()> {
    let manager = load(cli)?;
    println!("{}", serde_json::to_string_pretty(&manager.debug_config())?);
    Ok(())
}

fn validate_analytics(manager: &ConfigManager) -> anyhow::Result<()> {
    let analytics = &manager.config().analytics;
    println!("✅ Analytics");
    println!("   window_hours: {}", analytics.window_hours);
    println!("   red_grace_minutes: {}", analytics.red_grace_minutes);
    Ok(())
}

fn validate_worker_pool(manager: &ConfigManager) -> anyhow::Result<()> {
    let pool_config = manager.config().worker_pool.clone();
    let pool = AnalyticsWorkerPool::new(pool_config).context("building analytics worker pool")?;
    let config = pool.config();

    println!("✅ Worker pool");
    println!(
        "   core/max/queue: {}/{}/{}",
        config.core_pool_size, config.max_pool_size, config.queue_capacity
    );
    println!("   admission capacity: {}", config.admission_capacity());
    Ok(())
}

fn validate_database(manager: &ConfigManager) -> anyhow::Result<()> {
    let database = &manager.config().database;
    match &database.url {
        Some(_) => println!("✅ Database: PostgreSQL configured"),
        None => println!("⚠️  Database: no url configured, in-memory store only"),
    }
    println!("   max_connections: {}", database.max_connections);
    Ok(())
}
