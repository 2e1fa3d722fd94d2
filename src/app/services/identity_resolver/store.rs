//! Storage interface consulted and updated by identity resolution

use crate::Result;
use crate::app::models::{RaceId, RacerId, ResultRow};
use chrono::NaiveDate;

/// Racer history storage used while resolving finishers
///
/// Mutations made between [`begin_import`](RacerStore::begin_import) and
/// [`commit_import`](RacerStore::commit_import) must be discarded entirely by
/// [`rollback_import`](RacerStore::rollback_import).
pub trait RacerStore {
    /// Racers with at least one result under exactly this name, ascending by id
    fn find_racers_by_name(&self, name: &str) -> Result<Vec<RacerId>>;

    /// (race date, age category) for every result the racer owns
    fn historical_window_inputs(&self, racer_id: RacerId) -> Result<Vec<(NaiveDate, String)>>;

    /// Whether the race already holds a result under this name
    fn has_result_for_name_in_race(&self, race_id: RaceId, name: &str) -> Result<bool>;

    /// Mint a new racer identity
    fn create_racer(&mut self) -> Result<RacerId>;

    /// Attach a result row to a racer within a race
    fn attach_result(&mut self, race_id: RaceId, racer_id: RacerId, row: &ResultRow) -> Result<()>;

    /// Move every result of `source` to `target` and delete `source`
    ///
    /// Returns the number of results moved.
    fn merge_racers(&mut self, target: RacerId, source: RacerId) -> Result<usize>;

    fn begin_import(&mut self) -> Result<()>;

    fn commit_import(&mut self) -> Result<()>;

    fn rollback_import(&mut self) -> Result<()>;
}
