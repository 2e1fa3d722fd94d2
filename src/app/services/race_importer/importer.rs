//! Race import orchestration
//!
//! Parsing runs to completion before the store is touched. Store mutation then
//! happens inside one import transaction that is rolled back on any error.

use super::sink::RaceSink;
use crate::app::adapters::fetcher::RaceFetcher;
use crate::app::models::{ImportOutcome, RaceId, RaceMetadata, ResultRow};
use crate::app::services::identity_resolver::{RacerStore, ResolvedRow, resolve_race};
use crate::app::services::markup_extractor;
use crate::app::services::race_metadata;
use crate::app::services::result_grammar::{ParseStats, ResultGrammar};
use crate::{Error, Result};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// A fully parsed result page, not yet resolved against any store
#[derive(Debug, Clone)]
pub struct ParsedRace {
    pub metadata: RaceMetadata,

    /// Rows sorted by position
    pub rows: Vec<ResultRow>,

    pub stats: ParseStats,
}

/// A race committed to the store with every row bound to a racer
#[derive(Debug, Clone, Serialize)]
pub struct ImportedRace {
    pub race_id: RaceId,
    pub metadata: RaceMetadata,

    /// Resolved rows ordered by position
    pub results: Vec<ResolvedRow>,
}

impl ImportedRace {
    /// Number of racers minted by this import
    pub fn new_racers(&self) -> usize {
        self.results
            .iter()
            .filter(|resolved| resolved.resolution.is_new())
            .count()
    }
}

/// Parse a page with an existing grammar
pub fn parse_with(grammar: &ResultGrammar, raw: &[u8]) -> Result<ParsedRace> {
    let document = markup_extractor::extract(raw)?;
    let metadata = race_metadata::resolve_document(&document)?;
    let output = grammar.parse(&document.results_text)?;

    Ok(ParsedRace {
        metadata,
        rows: output.rows,
        stats: output.stats,
    })
}

/// Extract, resolve metadata and parse rows from raw page bytes
pub fn parse_race_page(raw: &[u8]) -> Result<ParsedRace> {
    parse_with(&ResultGrammar::new(), raw)
}

/// Imports result pages into a store that is both a [`RacerStore`] and a [`RaceSink`]
pub struct RaceImporter {
    grammar: ResultGrammar,
    allow_reimport: bool,
}

impl RaceImporter {
    pub fn new() -> Self {
        Self {
            grammar: ResultGrammar::new(),
            allow_reimport: false,
        }
    }

    /// Replace previously completed imports of the same source instead of refusing
    pub fn allow_reimport(mut self, allow: bool) -> Self {
        self.allow_reimport = allow;
        self
    }

    /// Import raw page bytes from `source`
    ///
    /// Every attempt, successful or not, is recorded with the sink.
    pub fn import_bytes<S>(&self, store: &mut S, source: &str, raw: &[u8]) -> Result<ImportedRace>
    where
        S: RacerStore + RaceSink,
    {
        let outcome = self.import_inner(store, source, raw);

        let record = match &outcome {
            Ok(imported) => ImportOutcome::Completed(imported.race_id),
            Err(e) => ImportOutcome::Failed(e.to_string()),
        };
        store.record_import(source, &record)?;

        outcome
    }

    /// Fetch `source` and import it
    pub async fn import_source<F, S>(
        &self,
        fetcher: &F,
        store: &mut S,
        source: &str,
    ) -> Result<ImportedRace>
    where
        F: RaceFetcher + ?Sized,
        S: RacerStore + RaceSink,
    {
        let page = fetcher.fetch(source).await;
        self.import_fetched(store, source, page)
    }

    /// Import the outcome of an earlier fetch of `source`
    ///
    /// Fetch failures are recorded like any other failed import.
    pub fn import_fetched<S>(
        &self,
        store: &mut S,
        source: &str,
        page: Result<Vec<u8>>,
    ) -> Result<ImportedRace>
    where
        S: RacerStore + RaceSink,
    {
        match page {
            Ok(raw) => self.import_bytes(store, source, &raw),
            Err(e) => {
                store.record_import(source, &ImportOutcome::Failed(e.to_string()))?;
                Err(e)
            }
        }
    }

    fn import_inner<S>(&self, store: &mut S, source: &str, raw: &[u8]) -> Result<ImportedRace>
    where
        S: RacerStore + RaceSink,
    {
        let start = Instant::now();

        if !self.allow_reimport && store.has_completed_import(source)? {
            return Err(Error::duplicate_import(source));
        }

        let parsed = parse_with(&self.grammar, raw)?;

        store.begin_import()?;
        match Self::apply(store, source, parsed) {
            Ok(imported) => {
                store.commit_import()?;
                info!(
                    "Imported '{}' ({}) from {}: {} results, {} new racers in {:.2?}",
                    imported.metadata.name,
                    imported.metadata.date,
                    source,
                    imported.results.len(),
                    imported.new_racers(),
                    start.elapsed()
                );
                Ok(imported)
            }
            Err(e) => {
                warn!("Import of {} failed, rolling back: {}", source, e);
                store.rollback_import()?;
                Err(e)
            }
        }
    }

    fn apply<S>(store: &mut S, source: &str, parsed: ParsedRace) -> Result<ImportedRace>
    where
        S: RacerStore + RaceSink,
    {
        let replaced = store.remove_source_races(source)?;
        if replaced > 0 {
            info!("Replacing {} earlier import(s) of {}", replaced, source);
        }

        let race_id = store.open_race(source, &parsed.metadata)?;
        let results = resolve_race(store, race_id, parsed.metadata.date, parsed.rows)?;
        store.complete_race(race_id)?;

        Ok(ImportedRace {
            race_id,
            metadata: parsed.metadata,
            results,
        })
    }
}

impl Default for RaceImporter {
    fn default() -> Self {
        Self::new()
    }
}
