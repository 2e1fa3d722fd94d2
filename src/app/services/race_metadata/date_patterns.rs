//! Ordered date patterns and month lookup

use crate::constants::MONTH_NAMES;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

const FULL_MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const SHORT_MONTHS: &str = "Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";
const DAY: &str = r"(?P<day>0?[1-9]|[12][0-9]|3[01])(?:st|nd|rd|th)?";
const YEAR: &str = r"(?P<year>\d{4})";

static MONTH_LOOKUP: LazyLock<HashMap<&'static str, u32>> =
    LazyLock::new(|| MONTH_NAMES.iter().copied().collect());

/// Date patterns in priority order
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // April 12th, 2015
        format!(r"(?i)\b(?P<month>{FULL_MONTHS})\s+{DAY},\s*{YEAR}\b"),
        // Apr. 12, 2015
        format!(r"(?i)\b(?P<month>{SHORT_MONTHS})\.?\s+{DAY},\s*{YEAR}\b"),
        // 26th July, 2015
        format!(r"(?i)\b{DAY}\s+(?P<month>{FULL_MONTHS}),?\s+{YEAR}\b"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date pattern is valid"))
    .collect()
});

/// Map a month name or abbreviation to 1-12, ignoring case
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_LOOKUP.get(name.to_uppercase().as_str()).copied()
}

/// Find the first calendar-valid date in `text`, trying patterns in order
pub fn find_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .find_map(|captures| date_from_captures(&captures))
    })
}

fn date_from_captures(captures: &Captures<'_>) -> Option<NaiveDate> {
    let month = month_number(captures.name("month")?.as_str())?;
    let day = captures.name("day")?.as_str().parse::<u32>().ok()?;
    let year = captures.name("year")?.as_str().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
