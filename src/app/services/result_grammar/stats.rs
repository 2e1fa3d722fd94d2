//! Parsing statistics and result structures for the result grammar

use crate::app::models::ResultRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed rows with statistics about the results block
#[derive(Debug, Clone)]
pub struct GrammarOutput {
    /// Rows sorted ascending by position
    pub rows: Vec<ResultRow>,

    pub stats: ParseStats,
}

/// Line-level statistics for one results block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical lines after the header
    pub total_lines: usize,

    /// Records matched by any layout
    pub rows_matched: usize,

    /// Blank lines
    pub blank_lines: usize,

    /// Non-blank lines that matched no layout and were not finisher-like
    pub lines_skipped: usize,

    /// Rows replaced by a later row with the same position
    pub duplicate_positions: usize,

    /// Rows dropped for having position 0
    pub malformed_rows: usize,

    /// Match count per layout name
    pub layout_hits: BTreeMap<String, usize>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout that matched the most records, if any matched
    pub fn dominant_layout(&self) -> Option<&str> {
        self.layout_hits
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(name, _)| name.as_str())
    }

    pub(crate) fn record_hit(&mut self, layout: &str) {
        self.rows_matched += 1;
        *self.layout_hits.entry(layout.to_string()).or_insert(0) += 1;
    }
}
