//! Import command implementation
//!
//! Pages are fetched concurrently, then imported one at a time in the order
//! the sources were given. The registry is saved once at the end.

use super::shared::{
    CommandStats, create_fetcher, create_progress_bar, emit, load_configuration, open_registry,
    save_registry,
};
use crate::app::adapters::fetcher::{RaceFetcher, is_remote};
use crate::app::models::RaceId;
use crate::app::services::race_importer::RaceImporter;
use crate::cli::args::{GlobalArgs, ImportArgs};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-source result of an import run
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_id: Option<RaceId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_date: Option<NaiveDate>,

    pub results: usize,
    pub new_racers: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceReport {
    fn failed(source: &str, error: &crate::Error) -> Self {
        Self {
            source: source.to_string(),
            race_id: None,
            race_name: None,
            race_date: None,
            results: 0,
            new_racers: 0,
            stage: Some(error.stage().to_string()),
            error: Some(error.to_string()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Expand glob patterns among local sources; URLs and plain paths pass through
pub fn expand_sources(sources: &[String]) -> crate::Result<Vec<String>> {
    let mut expanded = Vec::new();

    for source in sources {
        let source = source.trim();
        if is_remote(source) || !source.contains(['*', '?', '[']) {
            expanded.push(source.to_string());
            continue;
        }

        let mut matches: Vec<String> = glob::glob(source)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path.display().to_string()),
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .collect();
        matches.sort();

        if matches.is_empty() {
            warn!("Pattern '{}' matched no files", source);
        }
        debug!("Pattern '{}' matched {} files", source, matches.len());
        expanded.extend(matches);
    }

    Ok(expanded)
}

/// Run the import command
pub async fn run_import(args: ImportArgs, global: &GlobalArgs) -> Result<CommandStats> {
    let start = Instant::now();
    args.validate()?;

    let mut config = load_configuration(global)?;
    if let Some(concurrency) = args.concurrency {
        config = config.with_fetch_concurrency(concurrency);
    }
    if args.reimport {
        config = config.with_reimport(true);
    }

    let sources = expand_sources(&args.sources).context("Failed to expand sources")?;
    if sources.is_empty() {
        anyhow::bail!("No sources to import");
    }
    info!(
        "Importing {} pages with {} concurrent fetches",
        sources.len(),
        config.fetch_concurrency
    );

    let fetcher = create_fetcher(&config)?;
    let mut registry = open_registry(&config)?;
    let importer = RaceImporter::new().allow_reimport(config.allow_reimport);

    let pb = create_progress_bar(sources.len() as u64 * 2, global.show_progress());
    pb.set_message("fetching");

    let mut fetched: Vec<(usize, crate::Result<Vec<u8>>)> =
        stream::iter(sources.iter().enumerate())
            .map(|(index, source)| {
                let fetcher = &fetcher;
                let pb = &pb;
                async move {
                    let page = fetcher.fetch(source).await;
                    pb.inc(1);
                    (index, page)
                }
            })
            .buffer_unordered(config.fetch_concurrency)
            .collect()
            .await;
    fetched.sort_by_key(|(index, _)| *index);

    pb.set_message("importing");
    let mut reports = Vec::with_capacity(sources.len());
    for (index, page) in fetched {
        let source = &sources[index];

        let report = match importer.import_fetched(&mut registry, source, page) {
            Ok(imported) => SourceReport {
                source: source.clone(),
                race_id: Some(imported.race_id),
                race_name: Some(imported.metadata.name.clone()),
                race_date: Some(imported.metadata.date),
                results: imported.results.len(),
                new_racers: imported.new_racers(),
                stage: None,
                error: None,
            },
            Err(e) => {
                warn!("Import of {} failed at {} stage: {}", source, e.stage(), e);
                SourceReport::failed(source, &e)
            }
        };
        reports.push(report);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = CommandStats {
        races_imported: reports.iter().filter(|r| r.succeeded()).count(),
        imports_failed: reports.iter().filter(|r| !r.succeeded()).count(),
        racers_created: reports.iter().map(|r| r.new_racers).sum(),
        results_processed: reports.iter().map(|r| r.results).sum(),
        processing_time: start.elapsed(),
    };

    if stats.races_imported > 0 && !args.dry_run {
        save_registry(&registry, &config)?;
    } else if args.dry_run {
        info!("Dry run, registry not saved");
    }

    emit(global.output_format, &reports, |reports| {
        print_summary(reports, &stats, args.dry_run)
    })?;

    Ok(stats)
}

fn print_summary(reports: &[SourceReport], stats: &CommandStats, dry_run: bool) {
    for report in reports {
        if let (Some(race_id), Some(name), Some(date)) =
            (report.race_id, &report.race_name, report.race_date)
        {
            println!(
                "{} race {} {} ({}): {} results, {} new racers",
                "✓".green(),
                race_id,
                name.cyan(),
                date,
                report.results,
                report.new_racers
            );
        } else {
            println!(
                "{} {} [{}]: {}",
                "✗".red(),
                report.source,
                report.stage.as_deref().unwrap_or("unknown"),
                report.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!();
    println!(
        "{} {} imported, {} failed, {} results, {} new racers in {:.2?}",
        "Summary:".bold(),
        stats.races_imported.to_string().green(),
        if stats.imports_failed > 0 {
            stats.imports_failed.to_string().red()
        } else {
            stats.imports_failed.to_string().normal()
        },
        stats.results_processed,
        stats.racers_created,
        stats.processing_time
    );
    if dry_run {
        println!("{}", "Dry run: registry not saved".yellow());
    }
}
