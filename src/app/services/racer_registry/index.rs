//! Lookup indexes rebuilt from registry state

use super::RegistryState;
use crate::app::models::{RaceId, RaceResult, RacerId};
use std::collections::{BTreeSet, HashMap, HashSet};

/// In-memory indexes over the result list; never persisted
#[derive(Debug, Clone, Default)]
pub(crate) struct RegistryIndex {
    /// Racers who have raced under each name
    pub by_name: HashMap<String, BTreeSet<RacerId>>,

    /// Offsets into the result list per racer
    pub by_racer: HashMap<RacerId, Vec<usize>>,

    /// Names already present in each race
    pub names_in_race: HashMap<RaceId, HashSet<String>>,
}

impl RegistryIndex {
    pub fn build(state: &RegistryState) -> Self {
        let mut index = Self::default();
        for (offset, result) in state.results.iter().enumerate() {
            index.insert(offset, result);
        }
        index
    }

    pub fn insert(&mut self, offset: usize, result: &RaceResult) {
        self.by_name
            .entry(result.row.name.clone())
            .or_default()
            .insert(result.racer_id);
        self.by_racer
            .entry(result.racer_id)
            .or_default()
            .push(offset);
        self.names_in_race
            .entry(result.race_id)
            .or_default()
            .insert(result.row.name.clone());
    }
}
