//! Parse command implementation
//!
//! Fetches one page and prints what the pipeline sees, without opening the
//! registry.

use super::shared::{CommandStats, create_fetcher, emit, format_optional, load_configuration};
use crate::app::adapters::fetcher::RaceFetcher;
use crate::app::models::{RaceMetadata, ResultRow};
use crate::app::services::race_importer::parse_race_page;
use crate::app::services::result_grammar::ParseStats;
use crate::cli::args::{GlobalArgs, ParseArgs};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize)]
struct ParseReport<'a> {
    source: &'a str,
    metadata: &'a RaceMetadata,
    stats: &'a ParseStats,
    rows: &'a [ResultRow],
}

/// Run the parse command
pub async fn run_parse(args: ParseArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    let config = load_configuration(global)?;

    let fetcher = create_fetcher(&config)?;
    let raw = fetcher.fetch(&args.source).await?;
    let parsed = parse_race_page(&raw)
        .with_context(|| format!("Failed to parse page {}", args.source))?;

    let report = ParseReport {
        source: &args.source,
        metadata: &parsed.metadata,
        stats: &parsed.stats,
        rows: &parsed.rows,
    };
    emit(global.output_format, &report, print_report)?;

    Ok(CommandStats {
        results_processed: parsed.rows.len(),
        processing_time: start.elapsed(),
        ..CommandStats::default()
    })
}

fn print_report(report: &ParseReport<'_>) {
    println!(
        "{} {} ({})",
        "Race:".bold(),
        report.metadata.name.cyan(),
        report.metadata.date
    );
    println!(
        "Layout: {}  rows: {}  skipped: {}  duplicates: {}",
        report.stats.dominant_layout().unwrap_or("-"),
        report.stats.rows_matched,
        report.stats.lines_skipped,
        report.stats.duplicate_positions
    );
    println!();
    println!(
        "{:>5} {:>6}  {:<28} {:<6} {:>4} {:<7} {:>4} {:>9} {:>9}",
        "Pos", "Bib", "Name", "Club", "Sex", "Cat", "Cat#", "Time", "Chip"
    );
    for row in report.rows {
        println!(
            "{:>5} {:>6}  {:<28} {:<6} {:>4} {:<7} {:>4} {:>9} {:>9}",
            row.position,
            row.bib_number,
            row.name,
            format_optional(row.club.as_deref()),
            row.sex.symbol(),
            row.age_category,
            row.age_category_position,
            row.time,
            format_optional(row.chip_time.as_deref())
        );
    }
}
