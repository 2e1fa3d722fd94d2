//! Command-line argument definitions for the results processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::DEFAULT_RESULTS_LIMIT;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the race results processor
///
/// Imports published race result pages and links every finisher to a
/// persistent racer identity.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "results-processor",
    version,
    about = "Import running-race result pages and link finishers across races",
    long_about = "Imports race result pages published by timing vendors, parses the preformatted \
                  results block, and resolves every finisher to a persistent racer using their \
                  name and the birth-date range implied by their age categories."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single page and print its rows without touching the registry
    Parse(ParseArgs),
    /// Import result pages into the registry
    Import(ImportArgs),
    /// List imported races, most recent first
    Races(RacesArgs),
    /// Show results of one race by position
    Results(ResultsArgs),
    /// Show a racer's profile and race history
    Racer(RacerArgs),
    /// Merge one racer into another
    Merge(MergeArgs),
    /// Delete a race and its results
    DeleteRace(DeleteRaceArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct GlobalArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/results-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Registry snapshot path, overriding configuration
    #[arg(
        short = 's',
        long = "store",
        value_name = "FILE",
        global = true,
        help = "Registry snapshot path"
    )]
    pub store_path: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Page URL or local file
    #[arg(value_name = "SOURCE")]
    pub source: String,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Page URLs, local files or glob patterns, imported in the order given
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<String>,

    /// Maximum pages fetched at once
    #[arg(
        short = 'j',
        long = "concurrency",
        value_name = "COUNT",
        help = "Maximum concurrent page fetches"
    )]
    pub concurrency: Option<usize>,

    /// Replace races already imported from the same source
    #[arg(long = "reimport", help = "Replace earlier imports of the same source")]
    pub reimport: bool,

    /// Parse and resolve without saving the registry
    #[arg(long = "dry-run", help = "Import without saving the registry")]
    pub dry_run: bool,
}

/// Arguments for the races command
#[derive(Debug, Clone, Parser)]
pub struct RacesArgs {
    /// Show import attempts instead of races
    #[arg(long = "imports", help = "Show the import history")]
    pub imports: bool,
}

/// Arguments for the results command
#[derive(Debug, Clone, Parser)]
pub struct ResultsArgs {
    #[arg(value_name = "RACE_ID")]
    pub race_id: u64,

    /// First finishing position to show
    #[arg(long = "start", value_name = "POSITION", default_value_t = 0)]
    pub start_position: u32,

    /// Maximum rows to show
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "COUNT",
        default_value_t = DEFAULT_RESULTS_LIMIT
    )]
    pub limit: usize,
}

/// Arguments for the racer command
#[derive(Debug, Clone, Parser)]
pub struct RacerArgs {
    #[arg(value_name = "RACER_ID")]
    pub racer_id: u64,
}

/// Arguments for the merge command
#[derive(Debug, Clone, Parser)]
pub struct MergeArgs {
    /// Racer that keeps its id
    #[arg(value_name = "TARGET_ID")]
    pub target: u64,

    /// Racer whose results move to the target; deleted afterwards
    #[arg(value_name = "SOURCE_ID")]
    pub source: u64,
}

/// Arguments for the delete-race command
#[derive(Debug, Clone, Parser)]
pub struct DeleteRaceArgs {
    #[arg(value_name = "RACE_ID")]
    pub race_id: u64,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl GlobalArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl ImportArgs {
    /// Validate the import command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            return Err(Error::configuration(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        if self.sources.iter().any(|source| source.trim().is_empty()) {
            return Err(Error::configuration("Sources cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl MergeArgs {
    pub fn validate(&self) -> Result<()> {
        if self.target == self.source {
            return Err(Error::configuration(format!(
                "Cannot merge racer {} into itself",
                self.target
            )));
        }
        Ok(())
    }
}
