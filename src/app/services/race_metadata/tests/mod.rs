//! Tests for race name and date resolution

use crate::Error;
use crate::app::models::RaceDocument;
use crate::app::services::race_metadata::{
    find_date, month_number, race_name, resolve, resolve_document,
};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_race_name_takes_last_title_segment() {
    assert_eq!(race_name("Meet Title: Actual Name").unwrap(), "Actual Name");
    assert_eq!(
        race_name("NLAA: 2015: 88th Annual Tely 10 Mile Road Race ").unwrap(),
        "88th Annual Tely 10 Mile Road Race"
    );
    assert_eq!(race_name("  ANE Mile ").unwrap(), "ANE Mile");
}

#[test]
fn test_race_name_empty_title() {
    assert!(matches!(race_name(""), Err(Error::TitleNotFound)));
    assert!(matches!(race_name("Results:   "), Err(Error::TitleNotFound)));
}

#[test]
fn test_month_lookup_ignores_case() {
    assert_eq!(month_number("April"), Some(4));
    assert_eq!(month_number("DECEMBER"), Some(12));
    assert_eq!(month_number("sept"), Some(9));
    assert_eq!(month_number("Smarch"), None);
}

#[test]
fn test_find_date_with_ordinal_suffix() {
    assert_eq!(find_date("April 12th, 2015"), Some(date(2015, 4, 12)));
    assert_eq!(
        find_date("Sunday, July 26, 2015 at 8am"),
        Some(date(2015, 7, 26))
    );
    assert_eq!(find_date("june 1st, 2008"), Some(date(2008, 6, 1)));
}

#[test]
fn test_find_date_alternate_shapes() {
    assert_eq!(find_date("Held Apr. 26, 2015"), Some(date(2015, 4, 26)));
    assert_eq!(find_date("26th July, 2015"), Some(date(2015, 7, 26)));
}

#[test]
fn test_find_date_skips_impossible_dates() {
    assert_eq!(
        find_date("February 30, 2015 (rescheduled to March 7, 2015)"),
        Some(date(2015, 3, 7))
    );
    assert_eq!(find_date("no date here"), None);
}

#[test]
fn test_resolve_prefers_address_block() {
    let metadata = resolve(
        "NLAA: Flat Out 5 km",
        "St. John's\n  April 12th,\n 2015",
        "Results for May 1, 2015",
    )
    .unwrap();

    assert_eq!(metadata.name, "Flat Out 5 km");
    assert_eq!(metadata.date, date(2015, 4, 12));
}

#[test]
fn test_resolve_falls_back_to_first_results_line() {
    let metadata = resolve("NLAA: ANE Mile", "", "ANE Mile - September 13, 2014").unwrap();
    assert_eq!(metadata.date, date(2014, 9, 13));
}

#[test]
fn test_resolve_without_any_date() {
    let result = resolve("NLAA: ANE Mile", "Quidi Vidi", "Pos Bib Name Time");
    assert!(matches!(result, Err(Error::DateNotFound { .. })));
}

#[test]
fn test_resolve_document_uses_first_nonblank_results_line() {
    let document = RaceDocument {
        title: "Meet: Race".to_string(),
        address_text: String::new(),
        results_text: "\n\n  October 4, 2015 results\nPos Name\n".to_string(),
    };

    let metadata = resolve_document(&document).unwrap();
    assert_eq!(metadata.date, date(2015, 10, 4));
}
