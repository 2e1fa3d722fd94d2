//! Race record storage interface used by the importer

use crate::Result;
use crate::app::models::{ImportOutcome, RaceId, RaceMetadata};

/// Storage for race records and import bookkeeping
pub trait RaceSink {
    /// Whether a race from `source` has been imported successfully before
    fn has_completed_import(&self, source: &str) -> Result<bool>;

    /// Remove races previously imported from `source`, with their results
    fn remove_source_races(&mut self, source: &str) -> Result<usize>;

    /// Create a pending race record for an import in progress
    fn open_race(&mut self, source: &str, metadata: &RaceMetadata) -> Result<RaceId>;

    /// Mark a pending race as completed
    fn complete_race(&mut self, race_id: RaceId) -> Result<()>;

    /// Log the outcome of an import attempt
    fn record_import(&mut self, source: &str, outcome: &ImportOutcome) -> Result<()>;
}
