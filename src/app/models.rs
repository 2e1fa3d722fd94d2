//! Data models for race result processing
//!
//! This module contains the core data structures for representing extracted race
//! pages, finisher result rows, and the persistent racer/race records kept in the
//! registry.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable racer identifier; lower ids are older racers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RacerId(pub u64);

/// Stable race identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceId(pub u64);

impl fmt::Display for RacerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Extraction Structures
// =============================================================================

/// Text accumulated from a result page, discarded once parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceDocument {
    /// Text of the page title element
    pub title: String,

    /// Text of the first address-like metadata block
    pub address_text: String,

    /// Concatenated text of the preformatted results block(s)
    pub results_text: String,
}

impl RaceDocument {
    /// First non-blank line of the results text, where some vendors put the date
    pub fn first_results_line(&self) -> &str {
        self.results_text
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
    }
}

/// Race name and date resolved from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceMetadata {
    pub name: String,
    pub date: NaiveDate,
}

// =============================================================================
// Result Rows
// =============================================================================

/// Finisher sex as printed by the timing vendor
///
/// Symbols other than `M`/`F` are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Other(String),
}

impl Sex {
    /// Map a vendor symbol to a sex
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "M" | "m" => Sex::Male,
            "F" | "f" | "W" | "w" => Sex::Female,
            other => Sex::Other(other.to_string()),
        }
    }

    /// Symbol used when displaying the sex
    pub fn symbol(&self) -> &str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Other(symbol) => symbol,
        }
    }
}

impl From<String> for Sex {
    fn from(symbol: String) -> Self {
        Sex::from_symbol(&symbol)
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.symbol().to_string()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One finisher's line of data extracted from a results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Overall finishing position, unique within a race
    pub position: u32,

    /// Finisher name with any club abbreviation removed
    pub name: String,

    pub bib_number: String,

    /// Club abbreviation found in trailing parentheses of the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,

    /// Gun time as printed (clock format, not parsed)
    pub time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip_time: Option<String>,

    pub sex: Sex,

    /// Position within sex; 0 when the vendor does not print one
    pub sex_position: u32,

    /// Age category label, always present in the age category table
    pub age_category: String,

    pub age_category_position: u32,
}

impl ResultRow {
    /// Validate row invariants that the grammar cannot express
    pub fn validate(&self) -> Result<()> {
        if self.position == 0 {
            return Err(Error::data_validation(format!(
                "Result for '{}' has no finishing position",
                self.name
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Error::data_validation(format!(
                "Result at position {} has an empty name",
                self.position
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Birth Date Windows
// =============================================================================

/// Inclusive range of birth dates consistent with a racer's age categories
///
/// A window whose `earliest` is after its `latest` is contradictory: no birth
/// date satisfies every category the racer has raced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDateWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl BirthDateWindow {
    pub fn new(earliest: NaiveDate, latest: NaiveDate) -> Self {
        Self { earliest, latest }
    }

    /// True when no birth date fits the window
    pub fn is_contradictory(&self) -> bool {
        self.earliest > self.latest
    }

    /// Overlap of two windows, `None` when they share no date
    pub fn intersect(&self, other: &BirthDateWindow) -> Option<BirthDateWindow> {
        let window = self.narrow(other);
        (!window.is_contradictory()).then_some(window)
    }

    /// Latest of the lower bounds and earliest of the upper bounds, even if empty
    pub fn narrow(&self, other: &BirthDateWindow) -> BirthDateWindow {
        BirthDateWindow {
            earliest: self.earliest.max(other.earliest),
            latest: self.latest.min(other.latest),
        }
    }
}

impl fmt::Display for BirthDateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.earliest, self.latest)
    }
}

// =============================================================================
// Registry Records
// =============================================================================

/// Persistent racer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Racer {
    pub id: RacerId,
    pub created: DateTime<Utc>,
}

/// Import state of a race record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStatus::Pending => "pending",
            ImportStatus::Completed => "completed",
            ImportStatus::Failed => "failed",
        };
        f.pad(name)
    }
}

/// Persistent race record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub date: NaiveDate,
    pub source_url: String,
    pub status: ImportStatus,
    pub last_updated: DateTime<Utc>,
}

/// A result row attached to a racer within a race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: RaceId,
    pub racer_id: RacerId,
    pub row: ResultRow,
}

/// Outcome of one import attempt, kept for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTask {
    pub id: u64,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_id: Option<RaceId>,
    pub status: ImportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
    pub recorded: DateTime<Utc>,
}

/// What the importer reports about a finished attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Completed(RaceId),
    Failed(String),
}
