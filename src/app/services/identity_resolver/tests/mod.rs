//! Shared fixtures for identity resolution tests


use crate::app::models::{RaceId, RaceMetadata, ResultRow, Sex};
use crate::app::services::race_importer::RaceSink;
use crate::app::services::racer_registry::RacerRegistry;
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn row(position: u32, name: &str, category: &str) -> ResultRow {
    ResultRow {
        position,
        name: name.to_string(),
        bib_number: position.to_string(),
        club: None,
        time: "20:00".to_string(),
        chip_time: None,
        sex: Sex::Male,
        sex_position: position,
        age_category: category.to_string(),
        age_category_position: 1,
    }
}

pub fn open_race(registry: &mut RacerRegistry, source: &str, race_date: NaiveDate) -> RaceId {
    let metadata = RaceMetadata {
        name: source.to_string(),
        date: race_date,
    };
    registry.open_race(source, &metadata).unwrap()
}
