//! Read-side queries over the racer registry

use super::RacerRegistry;
use crate::app::models::{BirthDateWindow, ImportTask, Race, RaceId, RaceResult, RacerId};
use crate::app::services::identity_resolver::{RacerStore, window};
use crate::{Error, Result};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Summary of one racer's identity and history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RacerProfile {
    pub racer_id: RacerId,

    /// Distinct names the racer has raced under
    pub names: Vec<String>,

    /// Cumulative birth window; may be contradictory after a merge
    pub window: Option<BirthDateWindow>,

    pub result_count: usize,
}

impl RacerRegistry {
    /// All races, most recent first
    pub fn races(&self) -> Vec<&Race> {
        let mut races: Vec<&Race> = self.state.races.values().collect();
        races.sort_by_key(|race| (Reverse(race.date), Reverse(race.id)));
        races
    }

    pub fn race(&self, race_id: RaceId) -> Result<&Race> {
        self.state
            .races
            .get(&race_id)
            .ok_or(Error::RaceNotFound { id: race_id.0 })
    }

    /// Results of a race by position, from `start_position` onward, at most `limit`
    pub fn race_results(
        &self,
        race_id: RaceId,
        start_position: u32,
        limit: usize,
    ) -> Result<Vec<&RaceResult>> {
        self.race(race_id)?;

        let mut results: Vec<&RaceResult> = self
            .state
            .results
            .iter()
            .filter(|result| result.race_id == race_id && result.row.position >= start_position)
            .collect();
        results.sort_by_key(|result| result.row.position);
        results.truncate(limit);
        Ok(results)
    }

    /// A racer's results with their races, most recent race first
    pub fn racer_results(&self, racer_id: RacerId) -> Result<Vec<(&Race, &RaceResult)>> {
        if !self.state.racers.contains_key(&racer_id) {
            return Err(Error::RacerNotFound { id: racer_id.0 });
        }

        let mut history = Vec::new();
        for &offset in self.index.by_racer.get(&racer_id).into_iter().flatten() {
            let result = &self.state.results[offset];
            history.push((self.race(result.race_id)?, result));
        }
        history.sort_by_key(|(race, result)| (Reverse(race.date), result.race_id));
        Ok(history)
    }

    pub fn racer_profile(&self, racer_id: RacerId) -> Result<RacerProfile> {
        let history = self.racer_results(racer_id)?;
        let names: BTreeSet<String> = history
            .iter()
            .map(|(_, result)| result.row.name.clone())
            .collect();
        let window = window::fold(&self.historical_window_inputs(racer_id)?)?;

        Ok(RacerProfile {
            racer_id,
            names: names.into_iter().collect(),
            window,
            result_count: history.len(),
        })
    }

    /// Distinct finisher names known to the registry, sorted
    pub fn racer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Import attempts, oldest first
    pub fn import_tasks(&self) -> &[ImportTask] {
        &self.state.import_tasks
    }
}
