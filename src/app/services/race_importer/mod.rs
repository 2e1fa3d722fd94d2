//! Race import pipeline
//!
//! Page bytes flow through extraction, metadata resolution and the result
//! grammar, then every row is resolved to a racer and committed as one race.
//!
//! ## Architecture
//!
//! - [`sink`] - the [`RaceSink`] interface for race records and import history
//! - [`importer`] - parsing, transactions and failure bookkeeping

pub mod importer;
pub mod sink;

#[cfg(test)]
pub mod tests;

pub use importer::{ImportedRace, ParsedRace, RaceImporter, parse_race_page, parse_with};
pub use sink::RaceSink;
