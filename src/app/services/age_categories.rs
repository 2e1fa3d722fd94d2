//! Age category table and birth-date window inference
//!
//! Labels map to inclusive age bands. Given the race date, a band maps back to
//! the range of birth dates a finisher in that band could have.

use crate::app::models::BirthDateWindow;
use crate::constants::AGE_CATEGORIES;
use crate::{Error, Result};
use chrono::{Days, Months, NaiveDate};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Age band printed next to a finisher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeCategory {
    pub label: &'static str,
    pub min_age: u32,
    pub max_age: u32,
}

static CATEGORY_LOOKUP: LazyLock<HashMap<&'static str, AgeCategory>> = LazyLock::new(|| {
    AGE_CATEGORIES
        .iter()
        .map(|&(label, min_age, max_age)| {
            (
                label,
                AgeCategory {
                    label,
                    min_age,
                    max_age,
                },
            )
        })
        .collect()
});

/// Regex alternation matching exactly the labels in the table, longest first
static CATEGORY_PATTERN: LazyLock<String> = LazyLock::new(|| {
    let mut labels: Vec<&str> = AGE_CATEGORIES.iter().map(|(label, _, _)| *label).collect();
    labels.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    labels
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|")
});

/// Look up an age category by its printed label
pub fn lookup(label: &str) -> Result<AgeCategory> {
    CATEGORY_LOOKUP
        .get(label.trim())
        .copied()
        .ok_or_else(|| Error::unknown_age_category(label.trim()))
}

/// Pattern fragment for the result grammar, built from the table
pub fn category_pattern() -> &'static str {
    CATEGORY_PATTERN.as_str()
}

impl AgeCategory {
    /// Birth dates of anyone aged within this band on `race_date`
    ///
    /// A finisher aged `max_age` on race day was born no earlier than the day
    /// after their `max_age + 1` birthday would have fallen; the window spans
    /// `max_age - min_age + 1` years from there.
    pub fn birth_window(&self, race_date: NaiveDate) -> Result<BirthDateWindow> {
        let out_of_range = || {
            Error::data_validation(format!(
                "Birth window for '{}' on {} is out of calendar range",
                self.label, race_date
            ))
        };

        let earliest = race_date
            .checked_sub_months(Months::new(12 * (self.max_age + 1)))
            .and_then(|date| date.checked_add_days(Days::new(1)))
            .ok_or_else(out_of_range)?;

        let latest = earliest
            .checked_add_months(Months::new(12 * (self.max_age - self.min_age + 1)))
            .and_then(|date| date.checked_sub_days(Days::new(1)))
            .ok_or_else(out_of_range)?;

        Ok(BirthDateWindow::new(earliest, latest))
    }
}

/// Birth-date window implied by `label` on `race_date`
pub fn birth_window(race_date: NaiveDate, label: &str) -> Result<BirthDateWindow> {
    lookup(label)?.birth_window(race_date)
}
