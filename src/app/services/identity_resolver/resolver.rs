//! Per-row racer identity decisions

use super::store::RacerStore;
use super::window;
use crate::Result;
use crate::app::models::{BirthDateWindow, RaceId, RacerId, ResultRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// How a row was assigned to its racer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    /// No racer had ever raced under this name
    NewRacer,
    /// The name already appears in this race, so this must be someone else
    ForcedNew,
    /// An existing racer's birth window overlaps the row's
    Matched,
    /// Racers exist under this name but none is compatible
    UnmatchedNew,
}

impl Resolution {
    /// Whether a racer was minted for the row
    pub fn is_new(&self) -> bool {
        !matches!(self, Resolution::Matched)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resolution::NewRacer => "new",
            Resolution::ForcedNew => "forced-new",
            Resolution::Matched => "matched",
            Resolution::UnmatchedNew => "unmatched-new",
        };
        f.write_str(name)
    }
}

/// A result row bound to a racer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRow {
    pub racer_id: RacerId,
    pub resolution: Resolution,

    /// Racer's birth window after this row was applied
    pub window: BirthDateWindow,

    pub row: ResultRow,
}

/// Resolve one row to a racer and attach it in the store
///
/// Candidates are tried oldest first; the first whose cumulative window
/// overlaps the row's implied window takes the row.
pub fn resolve_row<S: RacerStore + ?Sized>(
    store: &mut S,
    race_id: RaceId,
    race_date: NaiveDate,
    row: ResultRow,
) -> Result<ResolvedRow> {
    let row_window = window::for_category(race_date, &row.age_category)?;
    let candidates = store.find_racers_by_name(&row.name)?;

    let (racer_id, resolution, racer_window) = if candidates.is_empty() {
        (store.create_racer()?, Resolution::NewRacer, row_window)
    } else if store.has_result_for_name_in_race(race_id, &row.name)? {
        debug!(
            "'{}' already in race {}, minting new racer",
            row.name, race_id
        );
        (store.create_racer()?, Resolution::ForcedNew, row_window)
    } else {
        match find_compatible(store, &candidates, &row_window)? {
            Some((racer_id, narrowed)) => (racer_id, Resolution::Matched, narrowed),
            None => (store.create_racer()?, Resolution::UnmatchedNew, row_window),
        }
    };

    store.attach_result(race_id, racer_id, &row)?;
    debug!(
        "Position {} '{}' -> racer {} ({})",
        row.position, row.name, racer_id, resolution
    );

    Ok(ResolvedRow {
        racer_id,
        resolution,
        window: racer_window,
        row,
    })
}

/// Resolve every row of a race in position order
pub fn resolve_race<S: RacerStore + ?Sized>(
    store: &mut S,
    race_id: RaceId,
    race_date: NaiveDate,
    rows: Vec<ResultRow>,
) -> Result<Vec<ResolvedRow>> {
    rows.into_iter()
        .map(|row| resolve_row(store, race_id, race_date, row))
        .collect()
}

/// First candidate whose history overlaps `row_window`, with the narrowed window
fn find_compatible<S: RacerStore + ?Sized>(
    store: &S,
    candidates: &[RacerId],
    row_window: &BirthDateWindow,
) -> Result<Option<(RacerId, BirthDateWindow)>> {
    for &candidate in candidates {
        let history = store.historical_window_inputs(candidate)?;

        let Some(cumulative) = window::fold(&history)? else {
            return Ok(Some((candidate, *row_window)));
        };

        if cumulative.is_contradictory() {
            warn!(
                "Racer {} has contradictory birth window {}, skipping",
                candidate, cumulative
            );
            continue;
        }

        if let Some(narrowed) = cumulative.intersect(row_window) {
            return Ok(Some((candidate, narrowed)));
        }
    }

    Ok(None)
}

/// Operator override: fold `source` into `target` without window checks
pub fn merge_racers<S: RacerStore + ?Sized>(
    store: &mut S,
    target: RacerId,
    source: RacerId,
) -> Result<usize> {
    let moved = store.merge_racers(target, source)?;

    let history = store.historical_window_inputs(target)?;
    if let Some(merged) = window::fold(&history)?.filter(BirthDateWindow::is_contradictory) {
        warn!(
            "Merged racer {} now has contradictory birth window {}",
            target, merged
        );
    }

    Ok(moved)
}
