//! Racer registry: persistent racers, races, results and import history
//!
//! The registry keeps the whole dataset in memory and persists it as a single
//! JSON snapshot. It implements both [`RacerStore`] for identity resolution
//! and [`RaceSink`] for the importer.
//!
//! ## Architecture
//!
//! - [`index`] - name, racer and race lookup indexes rebuilt from state
//! - [`query`] - read-side views used by the CLI
//! - [`loader`] - snapshot load and atomic save

pub mod index;
pub mod loader;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use query::RacerProfile;

use crate::app::models::{
    ImportOutcome, ImportStatus, ImportTask, Race, RaceId, RaceMetadata, RaceResult, Racer,
    RacerId, ResultRow,
};
use crate::app::services::identity_resolver::RacerStore;
use crate::app::services::race_importer::RaceSink;
use crate::{Error, Result};
use chrono::{NaiveDate, Utc};
use index::RegistryIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything the registry persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryState {
    pub(crate) racers: BTreeMap<RacerId, Racer>,
    pub(crate) races: BTreeMap<RaceId, Race>,
    pub(crate) results: Vec<RaceResult>,
    pub(crate) import_tasks: Vec<ImportTask>,
    pub(crate) next_racer_id: u64,
    pub(crate) next_race_id: u64,
    pub(crate) next_task_id: u64,
}

/// In-memory racer registry with snapshot transactions
#[derive(Debug, Clone, Default)]
pub struct RacerRegistry {
    pub(crate) state: RegistryState,
    pub(crate) index: RegistryIndex,

    /// State captured by `begin_import`, restored on rollback
    checkpoint: Option<Box<RegistryState>>,
}

impl RacerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap previously persisted state
    pub fn from_state(state: RegistryState) -> Self {
        let index = RegistryIndex::build(&state);
        Self {
            state,
            index,
            checkpoint: None,
        }
    }

    pub fn racer_count(&self) -> usize {
        self.state.racers.len()
    }

    pub fn race_count(&self) -> usize {
        self.state.races.len()
    }

    pub fn result_count(&self) -> usize {
        self.state.results.len()
    }

    /// Whether an import transaction is open
    pub fn in_import(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Delete a race and all of its results
    ///
    /// Racers left without results are kept; they simply stop matching.
    pub fn delete_race(&mut self, race_id: RaceId) -> Result<usize> {
        if self.state.races.remove(&race_id).is_none() {
            return Err(Error::RaceNotFound { id: race_id.0 });
        }

        let before = self.state.results.len();
        self.state
            .results
            .retain(|result| result.race_id != race_id);
        let removed = before - self.state.results.len();
        self.reindex();

        info!("Deleted race {} with {} results", race_id, removed);
        Ok(removed)
    }

    fn reindex(&mut self) {
        self.index = RegistryIndex::build(&self.state);
    }

    fn ensure_racer(&self, racer_id: RacerId) -> Result<()> {
        if self.state.racers.contains_key(&racer_id) {
            Ok(())
        } else {
            Err(Error::RacerNotFound { id: racer_id.0 })
        }
    }
}

impl RacerStore for RacerRegistry {
    fn find_racers_by_name(&self, name: &str) -> Result<Vec<RacerId>> {
        Ok(self
            .index
            .by_name
            .get(name)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    fn historical_window_inputs(&self, racer_id: RacerId) -> Result<Vec<(NaiveDate, String)>> {
        self.ensure_racer(racer_id)?;

        let offsets = self.index.by_racer.get(&racer_id);
        offsets
            .into_iter()
            .flatten()
            .map(|&offset| {
                let result = &self.state.results[offset];
                let race = self
                    .state
                    .races
                    .get(&result.race_id)
                    .ok_or(Error::RaceNotFound {
                        id: result.race_id.0,
                    })?;
                Ok((race.date, result.row.age_category.clone()))
            })
            .collect()
    }

    fn has_result_for_name_in_race(&self, race_id: RaceId, name: &str) -> Result<bool> {
        Ok(self
            .index
            .names_in_race
            .get(&race_id)
            .is_some_and(|names| names.contains(name)))
    }

    fn create_racer(&mut self) -> Result<RacerId> {
        self.state.next_racer_id += 1;
        let id = RacerId(self.state.next_racer_id);
        self.state.racers.insert(
            id,
            Racer {
                id,
                created: Utc::now(),
            },
        );
        Ok(id)
    }

    fn attach_result(&mut self, race_id: RaceId, racer_id: RacerId, row: &ResultRow) -> Result<()> {
        self.ensure_racer(racer_id)?;
        if !self.state.races.contains_key(&race_id) {
            return Err(Error::RaceNotFound { id: race_id.0 });
        }

        let result = RaceResult {
            race_id,
            racer_id,
            row: row.clone(),
        };
        let offset = self.state.results.len();
        self.index.insert(offset, &result);
        self.state.results.push(result);
        Ok(())
    }

    fn merge_racers(&mut self, target: RacerId, source: RacerId) -> Result<usize> {
        self.ensure_racer(target)?;
        self.ensure_racer(source)?;
        if target == source {
            return Err(Error::data_validation(format!(
                "Cannot merge racer {} into itself",
                target
            )));
        }

        let mut moved = 0;
        for result in self
            .state
            .results
            .iter_mut()
            .filter(|result| result.racer_id == source)
        {
            result.racer_id = target;
            moved += 1;
        }

        self.state.racers.remove(&source);
        self.reindex();

        info!(
            "Merged racer {} into {} ({} results)",
            source, target, moved
        );
        Ok(moved)
    }

    fn begin_import(&mut self) -> Result<()> {
        if self.checkpoint.is_some() {
            return Err(Error::registry("An import is already in progress"));
        }
        self.checkpoint = Some(Box::new(self.state.clone()));
        Ok(())
    }

    fn commit_import(&mut self) -> Result<()> {
        self.checkpoint
            .take()
            .map(|_| ())
            .ok_or_else(|| Error::registry("No import in progress to commit"))
    }

    fn rollback_import(&mut self) -> Result<()> {
        let checkpoint = self
            .checkpoint
            .take()
            .ok_or_else(|| Error::registry("No import in progress to roll back"))?;
        self.state = *checkpoint;
        self.reindex();
        debug!("Rolled back import");
        Ok(())
    }
}

impl RaceSink for RacerRegistry {
    fn has_completed_import(&self, source: &str) -> Result<bool> {
        Ok(self
            .state
            .races
            .values()
            .any(|race| race.source_url == source && race.status == ImportStatus::Completed))
    }

    fn remove_source_races(&mut self, source: &str) -> Result<usize> {
        let race_ids: Vec<RaceId> = self
            .state
            .races
            .values()
            .filter(|race| race.source_url == source)
            .map(|race| race.id)
            .collect();

        for race_id in &race_ids {
            self.delete_race(*race_id)?;
        }
        Ok(race_ids.len())
    }

    fn open_race(&mut self, source: &str, metadata: &RaceMetadata) -> Result<RaceId> {
        self.state.next_race_id += 1;
        let id = RaceId(self.state.next_race_id);
        self.state.races.insert(
            id,
            Race {
                id,
                name: metadata.name.clone(),
                date: metadata.date,
                source_url: source.to_string(),
                status: ImportStatus::Pending,
                last_updated: Utc::now(),
            },
        );
        Ok(id)
    }

    fn complete_race(&mut self, race_id: RaceId) -> Result<()> {
        let race = self
            .state
            .races
            .get_mut(&race_id)
            .ok_or(Error::RaceNotFound { id: race_id.0 })?;
        race.status = ImportStatus::Completed;
        race.last_updated = Utc::now();
        Ok(())
    }

    fn record_import(&mut self, source: &str, outcome: &ImportOutcome) -> Result<()> {
        self.state.next_task_id += 1;
        let (race_id, status, error_text) = match outcome {
            ImportOutcome::Completed(race_id) => (Some(*race_id), ImportStatus::Completed, None),
            ImportOutcome::Failed(message) => (None, ImportStatus::Failed, Some(message.clone())),
        };

        self.state.import_tasks.push(ImportTask {
            id: self.state.next_task_id,
            source_url: source.to_string(),
            race_id,
            status,
            error_text,
            recorded: Utc::now(),
        });
        Ok(())
    }
}
