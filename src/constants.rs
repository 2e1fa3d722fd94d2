//! Application constants for the results processor
//!
//! This module contains the static lookup tables (month names, age categories)
//! and the default values used throughout the application.

// =============================================================================
// Month Names
// =============================================================================

/// Month names as they appear on result pages, keyed in upper case
///
/// Both full names and the common abbreviations map to the month number.
pub const MONTH_NAMES: &[(&str, u32)] = &[
    ("JANUARY", 1),
    ("FEBRUARY", 2),
    ("MARCH", 3),
    ("APRIL", 4),
    ("MAY", 5),
    ("JUNE", 6),
    ("JULY", 7),
    ("AUGUST", 8),
    ("SEPTEMBER", 9),
    ("OCTOBER", 10),
    ("NOVEMBER", 11),
    ("DECEMBER", 12),
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("SEPT", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

// =============================================================================
// Age Categories
// =============================================================================

/// Age category labels with inclusive (min_age, max_age) bounds
///
/// The result grammar builds its category pattern from these labels, so every
/// label it can emit has bounds here.
pub const AGE_CATEGORIES: &[(&str, u32, u32)] = &[
    ("U20", 5, 19),
    ("-19", 5, 19),
    ("<20", 5, 19),
    ("20-24", 20, 24),
    ("25-29", 25, 29),
    ("20-29", 20, 29),
    ("30-34", 30, 34),
    ("35-39", 35, 39),
    ("30-39", 30, 39),
    ("40-44", 40, 44),
    ("45-49", 45, 49),
    ("40-49", 40, 49),
    ("50-54", 50, 54),
    ("55-59", 55, 59),
    ("50-59", 50, 59),
    ("60-64", 60, 64),
    ("65-69", 65, 69),
    ("60-69", 60, 69),
    ("70-74", 70, 74),
    ("75-79", 75, 79),
    ("70-79", 70, 79),
    ("70+", 70, 100),
    ("80-84", 80, 84),
    ("85-89", 85, 89),
    ("80-89", 80, 89),
    ("80+", 80, 100),
    ("90-99", 90, 99),
    ("90+", 90, 100),
    ("A", 5, 100),
    ("NOAGE", 5, 100),
];

// =============================================================================
// Markup
// =============================================================================

/// Element holding the preformatted results text
pub const RESULTS_ELEMENT: &str = "pre";

/// Element holding the page title
pub const TITLE_ELEMENT: &str = "title";

/// Element holding the race location and date
pub const ADDRESS_ELEMENT: &str = "address";

/// Separator between meet name and race name in page titles
pub const TITLE_SEPARATOR: char = ':';

// =============================================================================
// Defaults
// =============================================================================

/// Application directory name under the platform config/data directories
pub const APP_DIR_NAME: &str = "results-processor";

/// Registry snapshot file name
pub const REGISTRY_FILE_NAME: &str = "registry.json";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Upper bound on concurrent page fetches
pub const MAX_FETCH_CONCURRENCY: usize = 8;

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent sent with page fetches
pub const DEFAULT_USER_AGENT: &str = concat!("results-processor/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the registry path
pub const ENV_STORE_PATH: &str = "RESULTS_PROCESSOR_STORE";

/// Environment variable overriding fetch concurrency
pub const ENV_FETCH_CONCURRENCY: &str = "RESULTS_PROCESSOR_CONCURRENCY";

/// Default number of results shown per page by the `results` command
pub const DEFAULT_RESULTS_LIMIT: usize = 50;
