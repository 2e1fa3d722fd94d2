//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::adapters::fetcher::{HttpFetcher, SourceFetcher};
use crate::app::services::racer_registry::RacerRegistry;
use crate::cli::args::{GlobalArgs, OutputFormat};
use crate::config::Config;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Command statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Pages imported into the registry
    pub races_imported: usize,
    /// Pages that failed at any stage
    pub imports_failed: usize,
    /// Racers minted by this run
    pub racers_created: usize,
    /// Result rows written or shown
    pub results_processed: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl CommandStats {
    pub fn has_failures(&self) -> bool {
        self.imports_failed > 0
    }
}

/// Set up structured logging from the global flags
pub fn setup_logging(args: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("results_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &GlobalArgs) -> Result<Config> {
    let mut config = Config::load(args.config_file.as_deref())
        .context("Failed to load configuration")?;

    if let Some(store_path) = &args.store_path {
        config = config.with_store_path(store_path.clone());
    }

    config.validate().context("Invalid configuration")?;
    debug!("Using registry at {}", config.store_path.display());
    Ok(config)
}

/// Build the fetcher for URLs and local files from configuration
pub fn create_fetcher(config: &Config) -> Result<SourceFetcher> {
    let http = HttpFetcher::new(config.request_timeout(), &config.user_agent)
        .context("Failed to create HTTP client")?;
    Ok(SourceFetcher::new(http))
}

/// Open the registry snapshot named by the configuration
pub fn open_registry(config: &Config) -> Result<RacerRegistry> {
    RacerRegistry::load(&config.store_path).with_context(|| {
        format!(
            "Failed to load registry from {}",
            config.store_path.display()
        )
    })
}

pub fn save_registry(registry: &RacerRegistry, config: &Config) -> Result<()> {
    registry.save(&config.store_path).with_context(|| {
        format!("Failed to save registry to {}", config.store_path.display())
    })?;
    info!("Registry saved to {}", config.store_path.display());
    Ok(())
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{}", text);
    Ok(())
}

/// Either print JSON or run the human renderer
pub fn emit<T, F>(format: OutputFormat, value: &T, human: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Human => {
            human(value);
            Ok(())
        }
    }
}

/// Create a progress bar for page imports
pub fn create_progress_bar(total: u64, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Render an optional time column
pub fn format_optional(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
