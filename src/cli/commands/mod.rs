//! Command implementations for the results processor CLI
//!
//! Each command lives in its own module:
//! - `parse`: dry parse of a single page
//! - `import`: concurrent fetch then sequential import into the registry
//! - `registry`: race, result and racer queries plus merge and delete

pub mod import;
pub mod parse;
pub mod registry;
pub mod shared;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command runner
///
/// Sets up logging from the global flags, then dispatches to the subcommand
/// handler. A missing subcommand is rejected; the binary prints help instead.
pub async fn run(args: Args) -> Result<CommandStats> {
    let Some(command) = args.command else {
        anyhow::bail!("No command given");
    };

    shared::setup_logging(&args.global)?;
    let global = &args.global;

    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args, global).await,
        Commands::Import(import_args) => import::run_import(import_args, global).await,
        Commands::Races(races_args) => registry::run_races(races_args, global).await,
        Commands::Results(results_args) => registry::run_results(results_args, global).await,
        Commands::Racer(racer_args) => registry::run_racer(racer_args, global).await,
        Commands::Merge(merge_args) => registry::run_merge(merge_args, global).await,
        Commands::DeleteRace(delete_args) => registry::run_delete_race(delete_args, global).await,
    }
}
