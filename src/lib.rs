//! Race Results Processor Library
//!
//! A Rust library for importing published running-race result pages and linking
//! every finisher to a persistent racer identity.
//!
//! This library provides tools for:
//! - Extracting the results block, title and date from vendor result pages
//! - Parsing finisher lines from several timing-software layouts
//! - Inferring birth-date windows from age-category labels
//! - Resolving finishers to racers across races without a personal identifier
//! - Persisting racers, races and results in a JSON-backed registry

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod age_categories;
        pub mod identity_resolver;
        pub mod markup_extractor;
        pub mod race_importer;
        pub mod race_metadata;
        pub mod racer_registry;
        pub mod result_grammar;
    }
    pub mod adapters {
        pub mod fetcher;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{RaceId, RaceMetadata, RacerId, ResultRow, Sex};
pub use config::Config;

/// Result type alias for the results processor
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error belongs to, used when reporting failed imports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Fetch,
    Extraction,
    Metadata,
    Grammar,
    AgeCategory,
    Store,
    Other,
}

impl std::fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorStage::Fetch => "fetch",
            ErrorStage::Extraction => "extraction",
            ErrorStage::Metadata => "metadata",
            ErrorStage::Grammar => "grammar",
            ErrorStage::AgeCategory => "age-category",
            ErrorStage::Store => "store",
            ErrorStage::Other => "other",
        };
        f.write_str(name)
    }
}

/// Error types for race result processing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Fetching a result page failed
    #[error("Failed to fetch '{source_url}': {message}")]
    Fetch { source_url: String, message: String },

    /// The page has no preformatted results block
    #[error("Results not found in page")]
    NoResultsBlock,

    /// The page title is missing or empty
    #[error("Race title not found in page")]
    TitleNotFound,

    /// No recognizable race date in the address block or first results line
    #[error("Could not find race date in: {searched}")]
    DateNotFound { searched: String },

    /// A numeric-looking line matched none of the known vendor layouts
    #[error("Unrecognized result line {line_number}: '{line}'")]
    UnrecognizedLine { line_number: usize, line: String },

    /// The results block produced no rows
    #[error("No result rows could be parsed")]
    NoRowsParsed,

    /// Age category label missing from the category table
    #[error("Failed to find age category '{label}'")]
    UnknownAgeCategory { label: String },

    /// Source has already been imported
    #[error("Race from '{source_url}' has already been imported")]
    DuplicateImport { source_url: String },

    /// Racer not found in the registry
    #[error("Racer not found: id = {id}")]
    RacerNotFound { id: u64 },

    /// Race not found in the registry
    #[error("Race not found: id = {id}")]
    RaceNotFound { id: u64 },

    /// Registry state error (transactions, persistence)
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Serialization of the registry snapshot failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(source_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_url: source_url.into(),
            message: message.into(),
        }
    }

    /// Create a date not found error
    pub fn date_not_found(searched: impl Into<String>) -> Self {
        Self::DateNotFound {
            searched: searched.into(),
        }
    }

    /// Create an unrecognized line error
    pub fn unrecognized_line(line_number: usize, line: impl Into<String>) -> Self {
        Self::UnrecognizedLine {
            line_number,
            line: line.into(),
        }
    }

    /// Create an unknown age category error
    pub fn unknown_age_category(label: impl Into<String>) -> Self {
        Self::UnknownAgeCategory {
            label: label.into(),
        }
    }

    /// Create a duplicate import error
    pub fn duplicate_import(source_url: impl Into<String>) -> Self {
        Self::DuplicateImport {
            source_url: source_url.into(),
        }
    }

    /// Create a registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Pipeline stage this error belongs to
    pub fn stage(&self) -> ErrorStage {
        match self {
            Self::Fetch { .. } => ErrorStage::Fetch,
            Self::NoResultsBlock | Self::TitleNotFound => ErrorStage::Extraction,
            Self::DateNotFound { .. } => ErrorStage::Metadata,
            Self::UnrecognizedLine { .. } | Self::NoRowsParsed => ErrorStage::Grammar,
            Self::UnknownAgeCategory { .. } => ErrorStage::AgeCategory,
            Self::DuplicateImport { .. }
            | Self::RacerNotFound { .. }
            | Self::RaceNotFound { .. }
            | Self::Registry { .. }
            | Self::Serialization { .. } => ErrorStage::Store,
            Self::Io { .. }
            | Self::Configuration { .. }
            | Self::DataValidation { .. } => ErrorStage::Other,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "Registry snapshot serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::Configuration {
            message: format!("Invalid source pattern: {}", error),
        }
    }
}
