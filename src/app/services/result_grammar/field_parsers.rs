//! Field conversion from raw captures to result rows
//!
//! Integer subfields parse defensively: anything unparseable becomes 0 rather
//! than failing the race.

use super::matchers::RawFields;
use crate::app::models::{ResultRow, Sex};
use regex::Regex;
use std::sync::LazyLock;

static CLUB_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s*\((?P<club>[A-Z]{2,4})\)\s*$").expect("club pattern is valid")
});

static NUMERIC_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.?\s+\S").expect("numeric line pattern is valid"));

/// Parse a position-like count, 0 when missing or malformed
pub fn parse_count(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

/// Split a trailing `(ABC)` club abbreviation off a finisher name
pub fn split_club(raw_name: &str) -> (String, Option<String>) {
    let trimmed = raw_name.trim();
    match CLUB_SUFFIX.captures(trimmed) {
        Some(captures) => {
            let name = captures.name("name").map_or("", |m| m.as_str()).trim();
            let club = captures.name("club").map(|m| m.as_str().to_string());
            if name.is_empty() {
                (trimmed.to_string(), None)
            } else {
                (name.to_string(), club)
            }
        }
        None => (trimmed.to_string(), None),
    }
}

/// True when an unmatched line starts like a finisher row
pub fn looks_like_result(line: &str) -> bool {
    NUMERIC_LINE.is_match(line)
}

/// Optional text field, `None` when blank
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Build a result row from captured fields
pub fn build_row(fields: &RawFields<'_>) -> ResultRow {
    let (name, club) = split_club(fields.name);

    ResultRow {
        position: parse_count(fields.position),
        name,
        bib_number: fields.bib_number.trim().to_string(),
        club,
        time: fields.time.trim().to_string(),
        chip_time: non_blank(fields.chip_time),
        sex: Sex::from_symbol(fields.sex),
        sex_position: fields.sex_position.map_or(0, parse_count),
        age_category: fields.age_category.trim().to_string(),
        age_category_position: parse_count(fields.age_category_position),
    }
}
