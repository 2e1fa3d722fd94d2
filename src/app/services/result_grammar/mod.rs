//! Result line grammar for preformatted race results
//!
//! Timing vendors print finisher lines in a handful of fixed-column layouts.
//! The grammar tries each layout in priority order and keeps the first
//! structural match.
//!
//! ## Architecture
//!
//! - [`matchers`] - one [`LineMatcher`] per vendor layout
//! - [`field_parsers`] - club splitting and defensive integer parsing
//! - [`parser`] - line walk, header skipping and position keying
//! - [`stats`] - per-block line statistics
//!
//! ## Usage
//!
//! ```rust
//! use results_processor::app::services::result_grammar::ResultGrammar;
//!
//! let text = "Pos  Bib Name          Time   Sex      Cat    Pos\n\
//!             1    101 JORDAN FEWER  15:45  M(1/52)  20-29  1\n";
//! let output = ResultGrammar::new().parse(text).unwrap();
//! assert_eq!(output.rows[0].name, "JORDAN FEWER");
//! ```

pub mod field_parsers;
pub mod matchers;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use matchers::{LineMatcher, RawFields};
pub use parser::{ResultGrammar, parse};
pub use stats::{GrammarOutput, ParseStats};
