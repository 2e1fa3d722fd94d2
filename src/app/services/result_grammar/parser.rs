//! Results block parsing orchestration
//!
//! Walks the results text line by line, offering each line (or line pair) to
//! the matcher cascade and collecting rows keyed by position.

use super::field_parsers::{build_row, looks_like_result};
use super::matchers::{LineMatcher, default_matchers};
use super::stats::{GrammarOutput, ParseStats};
use crate::app::models::ResultRow;
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Ordered cascade of vendor line layouts
pub struct ResultGrammar {
    matchers: Vec<Box<dyn LineMatcher>>,
}

impl ResultGrammar {
    /// Grammar with every known vendor layout
    pub fn new() -> Self {
        Self::with_matchers(default_matchers())
    }

    /// Grammar with a custom matcher cascade, tried in the given order
    pub fn with_matchers(matchers: Vec<Box<dyn LineMatcher>>) -> Self {
        Self { matchers }
    }

    /// Names of the layouts in priority order
    pub fn layouts(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|matcher| matcher.name()).collect()
    }

    /// Parse a results block into rows sorted by position
    ///
    /// The first non-blank line is the column header and is dropped. A
    /// finisher-like line that no layout recognizes fails the whole block.
    pub fn parse(&self, results_text: &str) -> Result<GrammarOutput> {
        let lines: Vec<&str> = results_text.lines().collect();
        let mut stats = ParseStats::new();
        let mut rows: BTreeMap<u32, ResultRow> = BTreeMap::new();

        let mut index = match lines.iter().position(|line| !line.trim().is_empty()) {
            Some(header) => header + 1,
            None => return Err(Error::NoRowsParsed),
        };
        stats.total_lines = lines.len() - index;

        while index < lines.len() {
            let line = lines[index];

            if line.trim().is_empty() {
                stats.blank_lines += 1;
                index += 1;
                continue;
            }

            match self.match_at(&lines, index) {
                Some((layout, span, row)) => {
                    stats.record_hit(layout);
                    if let Err(e) = row.validate() {
                        debug!("Dropping row at line {}: {}", index + 1, e);
                        stats.malformed_rows += 1;
                    } else if let Some(previous) = rows.insert(row.position, row) {
                        debug!(
                            "Position {} repeated, replacing '{}'",
                            previous.position, previous.name
                        );
                        stats.duplicate_positions += 1;
                    }
                    index += span;
                }
                None if looks_like_result(line) => {
                    return Err(Error::unrecognized_line(index + 1, line.trim()));
                }
                None => {
                    debug!("Skipping non-result line {}: '{}'", index + 1, line.trim());
                    stats.lines_skipped += 1;
                    index += 1;
                }
            }
        }

        if rows.is_empty() {
            return Err(Error::NoRowsParsed);
        }

        info!(
            "Parsed {} rows ({} skipped lines, layout {})",
            rows.len(),
            stats.lines_skipped,
            stats.dominant_layout().unwrap_or("none")
        );

        Ok(GrammarOutput {
            rows: rows.into_values().collect(),
            stats,
        })
    }

    /// First matcher accepting the record starting at `index`
    fn match_at(&self, lines: &[&str], index: usize) -> Option<(&'static str, usize, ResultRow)> {
        let line = lines[index];

        for matcher in &self.matchers {
            let row = match matcher.span() {
                1 => matcher.try_match(line).map(|fields| build_row(&fields)),
                span => {
                    if index + span > lines.len() {
                        continue;
                    }
                    let joined = lines[index..index + span].join("\n");
                    matcher.try_match(&joined).map(|fields| build_row(&fields))
                }
            };

            if let Some(row) = row {
                return Some((matcher.name(), matcher.span(), row));
            }
        }

        None
    }
}

impl Default for ResultGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a results block with every known layout
pub fn parse(results_text: &str) -> Result<GrammarOutput> {
    ResultGrammar::new().parse(results_text)
}
