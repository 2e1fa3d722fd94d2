//! Tests for registry read-side queries

use super::*;
use crate::Error;
use crate::app::models::{RaceId, RacerId};
use crate::app::services::identity_resolver::RacerStore;

fn populated_registry() -> (RacerRegistry, RaceId, RaceId, RacerId) {
    let mut registry = RacerRegistry::new();
    let april = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));
    let may = create_test_race(&mut registry, "b.html", "Harbour", (2015, 5, 3));
    let jordan = registry.create_racer().unwrap();

    for position in [5, 1, 3] {
        let racer = registry.create_racer().unwrap();
        let row = create_test_row(position, &format!("RUNNER {position}"), "30-39");
        registry.attach_result(april, racer, &row).unwrap();
    }
    registry
        .attach_result(april, jordan, &create_test_row(2, "JORDAN FEWER", "20-29"))
        .unwrap();
    registry
        .attach_result(may, jordan, &create_test_row(7, "JORDAN FEWER", "20-29"))
        .unwrap();

    (registry, april, may, jordan)
}

#[test]
fn test_races_most_recent_first() {
    let (registry, april, may, _) = populated_registry();

    let ids: Vec<RaceId> = registry.races().iter().map(|race| race.id).collect();
    assert_eq!(ids, vec![may, april]);
}

#[test]
fn test_race_results_paging() {
    let (registry, april, _, _) = populated_registry();

    let all = registry.race_results(april, 0, 50).unwrap();
    let positions: Vec<u32> = all.iter().map(|result| result.row.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 5]);

    let page = registry.race_results(april, 3, 1).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].row.position, 3);
}

#[test]
fn test_race_results_for_unknown_race() {
    let (registry, _, _, _) = populated_registry();
    assert!(matches!(
        registry.race_results(RaceId(99), 0, 10),
        Err(Error::RaceNotFound { id: 99 })
    ));
}

#[test]
fn test_racer_results_most_recent_first() {
    let (registry, april, may, jordan) = populated_registry();

    let history = registry.racer_results(jordan).unwrap();
    let races: Vec<RaceId> = history.iter().map(|(race, _)| race.id).collect();
    assert_eq!(races, vec![may, april]);
}

#[test]
fn test_racer_profile_window() {
    let (registry, _, _, jordan) = populated_registry();

    let profile = registry.racer_profile(jordan).unwrap();
    assert_eq!(profile.names, vec!["JORDAN FEWER".to_string()]);
    assert_eq!(profile.result_count, 2);

    let window = profile.window.unwrap();
    assert_eq!(
        window.earliest,
        NaiveDate::from_ymd_opt(1985, 5, 4).unwrap()
    );
    assert_eq!(
        window.latest,
        NaiveDate::from_ymd_opt(1995, 4, 12).unwrap()
    );
}

#[test]
fn test_delete_race_removes_results() {
    let (mut registry, april, _, jordan) = populated_registry();

    let removed = registry.delete_race(april).unwrap();

    assert_eq!(removed, 4);
    assert_eq!(registry.racer_results(jordan).unwrap().len(), 1);
    assert!(matches!(
        registry.delete_race(april),
        Err(Error::RaceNotFound { .. })
    ));
}

#[test]
fn test_racer_names_sorted() {
    let (registry, _, _, _) = populated_registry();
    let names = registry.racer_names();
    assert_eq!(names.first(), Some(&"JORDAN FEWER"));
    assert_eq!(names.len(), 4);
}
