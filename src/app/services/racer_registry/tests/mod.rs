//! Shared fixtures for racer registry tests

pub mod query_tests;
pub mod store_tests;

use crate::app::models::{RaceId, RaceMetadata, ResultRow, Sex};
use crate::app::services::race_importer::RaceSink;
use crate::app::services::racer_registry::RacerRegistry;
use chrono::NaiveDate;

pub fn create_test_row(position: u32, name: &str, category: &str) -> ResultRow {
    ResultRow {
        position,
        name: name.to_string(),
        bib_number: (100 + position).to_string(),
        club: None,
        time: format!("{}:00", 15 + position),
        chip_time: None,
        sex: Sex::Male,
        sex_position: position,
        age_category: category.to_string(),
        age_category_position: 1,
    }
}

pub fn create_test_race(
    registry: &mut RacerRegistry,
    source: &str,
    name: &str,
    date: (i32, u32, u32),
) -> RaceId {
    let metadata = RaceMetadata {
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    };
    registry.open_race(source, &metadata).unwrap()
}
