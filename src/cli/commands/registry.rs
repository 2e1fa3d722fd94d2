//! Registry query and maintenance commands
//!
//! `races`, `results` and `racer` only read the snapshot; `merge` and
//! `delete-race` rewrite it.

use super::shared::{
    CommandStats, emit, format_optional, load_configuration, open_registry, save_registry,
};
use crate::app::models::{ImportStatus, ImportTask, Race, RaceId, RaceResult, RacerId};
use crate::app::services::identity_resolver::merge_racers;
use crate::app::services::racer_registry::RacerProfile;
use crate::cli::args::{DeleteRaceArgs, GlobalArgs, MergeArgs, RacerArgs, RacesArgs, ResultsArgs};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize)]
struct RaceResults<'a> {
    race: &'a Race,
    results: Vec<&'a RaceResult>,
}

#[derive(Serialize)]
struct RacerHistory<'a> {
    profile: RacerProfile,
    races: Vec<HistoryEntry<'a>>,
}

#[derive(Serialize)]
struct HistoryEntry<'a> {
    race: &'a Race,
    result: &'a RaceResult,
}

#[derive(Serialize)]
struct MaintenanceReport {
    action: &'static str,
    id: u64,
    results_affected: usize,
}

/// List races, or the import history with `--imports`
pub async fn run_races(args: RacesArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    let config = load_configuration(global)?;
    let registry = open_registry(&config)?;

    if args.imports {
        let tasks = registry.import_tasks();
        emit(global.output_format, tasks, print_tasks)?;
    } else {
        let races = registry.races();
        emit(global.output_format, &races, |races| print_races(races))?;
    }

    Ok(CommandStats {
        processing_time: start.elapsed(),
        ..CommandStats::default()
    })
}

/// Show one page of a race's results
pub async fn run_results(args: ResultsArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    let config = load_configuration(global)?;
    let registry = open_registry(&config)?;

    let race_id = RaceId(args.race_id);
    let race = registry.race(race_id)?;
    let results = registry.race_results(race_id, args.start_position, args.limit)?;
    let shown = results.len();

    emit(
        global.output_format,
        &RaceResults { race, results },
        print_race_results,
    )?;

    Ok(CommandStats {
        results_processed: shown,
        processing_time: start.elapsed(),
        ..CommandStats::default()
    })
}

/// Show a racer's profile and every race they ran
pub async fn run_racer(args: RacerArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    let config = load_configuration(global)?;
    let registry = open_registry(&config)?;

    let racer_id = RacerId(args.racer_id);
    let profile = registry.racer_profile(racer_id)?;
    let races: Vec<HistoryEntry<'_>> = registry
        .racer_results(racer_id)?
        .into_iter()
        .map(|(race, result)| HistoryEntry { race, result })
        .collect();
    let shown = races.len();

    emit(
        global.output_format,
        &RacerHistory { profile, races },
        print_racer,
    )?;

    Ok(CommandStats {
        results_processed: shown,
        processing_time: start.elapsed(),
        ..CommandStats::default()
    })
}

/// Fold one racer into another and save
pub async fn run_merge(args: MergeArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    args.validate()?;

    let config = load_configuration(global)?;
    let mut registry = open_registry(&config)?;

    let moved = merge_racers(&mut registry, RacerId(args.target), RacerId(args.source))
        .with_context(|| format!("Failed to merge racer {} into {}", args.source, args.target))?;
    save_registry(&registry, &config)?;

    let report = MaintenanceReport {
        action: "merge",
        id: args.target,
        results_affected: moved,
    };
    emit(global.output_format, &report, |_| {
        println!(
            "{} Merged racer {} into {} ({} results moved)",
            "✓".green(),
            args.source,
            args.target,
            moved
        );
    })?;

    Ok(CommandStats {
        results_processed: moved,
        processing_time: start.elapsed(),
        ..CommandStats::default()
    })
}

/// Delete a race with its results and save
pub async fn run_delete_race(args: DeleteRaceArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    let config = load_configuration(global)?;
    let mut registry = open_registry(&config)?;

    let removed = registry.delete_race(RaceId(args.race_id))?;
    save_registry(&registry, &config)?;

    let report = MaintenanceReport {
        action: "delete-race",
        id: args.race_id,
        results_affected: removed,
    };
    emit(global.output_format, &report, |_| {
        println!(
            "{} Deleted race {} ({} results removed)",
            "✓".green(),
            args.race_id,
            removed
        );
    })?;

    Ok(CommandStats {
        results_processed: removed,
        processing_time: start.elapsed(),
        ..CommandStats::default()
    })
}

fn print_races(races: &[&Race]) {
    if races.is_empty() {
        println!("No races imported yet");
        return;
    }

    println!(
        "{:>5}  {:<10}  {:<40}  {:<9}  Source",
        "Id", "Date", "Name", "Status"
    );
    for race in races {
        println!(
            "{:>5}  {:<10}  {:<40}  {:<9}  {}",
            race.id, race.date, race.name, race.status, race.source_url
        );
    }
}

fn print_tasks(tasks: &[ImportTask]) {
    if tasks.is_empty() {
        println!("No imports recorded");
        return;
    }

    for task in tasks {
        let status = match task.status {
            ImportStatus::Completed => task.status.to_string().green(),
            ImportStatus::Failed => task.status.to_string().red(),
            ImportStatus::Pending => task.status.to_string().yellow(),
        };
        println!(
            "{:>5}  {}  {:<9}  {}",
            task.id,
            task.recorded.format("%Y-%m-%d %H:%M"),
            status,
            task.source_url
        );
        if let Some(error) = &task.error_text {
            println!("       {}", error.dimmed());
        }
    }
}

fn print_race_results(view: &RaceResults<'_>) {
    println!(
        "{} {} ({})",
        "Race".bold(),
        view.race.name.cyan(),
        view.race.date
    );
    println!(
        "{:>5} {:>7}  {:<28} {:>4} {:<7} {:>9} {:>9}",
        "Pos", "Racer", "Name", "Sex", "Cat", "Time", "Chip"
    );
    for result in &view.results {
        let row = &result.row;
        println!(
            "{:>5} {:>7}  {:<28} {:>4} {:<7} {:>9} {:>9}",
            row.position,
            result.racer_id,
            row.name,
            row.sex.symbol(),
            row.age_category,
            row.time,
            format_optional(row.chip_time.as_deref())
        );
    }
}

fn print_racer(view: &RacerHistory<'_>) {
    let profile = &view.profile;
    println!("{} {}", "Racer".bold(), profile.racer_id);
    println!("Names:        {}", profile.names.join(", "));
    match profile.window {
        Some(window) if window.is_contradictory() => {
            println!("Birth window: {} {}", window, "(contradictory)".red())
        }
        Some(window) => println!("Birth window: {}", window),
        None => println!("Birth window: -"),
    }
    println!("Results:      {}", profile.result_count);
    println!();

    for entry in &view.races {
        let row = &entry.result.row;
        println!(
            "{}  {:<40} {:>5}  {:<7} {:>9}",
            entry.race.date, entry.race.name, row.position, row.age_category, row.time
        );
    }
}
