//! Tests for the store and sink operations of the registry

use super::*;
use crate::Error;
use crate::app::models::{ImportOutcome, ImportStatus, RacerId};
use crate::app::services::identity_resolver::RacerStore;

#[test]
fn test_racer_ids_are_sequential() {
    let mut registry = RacerRegistry::new();

    assert_eq!(registry.create_racer().unwrap(), RacerId(1));
    assert_eq!(registry.create_racer().unwrap(), RacerId(2));
    assert_eq!(registry.racer_count(), 2);
}

#[test]
fn test_attach_result_updates_lookups() {
    let mut registry = RacerRegistry::new();
    let race = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));
    let racer = registry.create_racer().unwrap();

    registry
        .attach_result(race, racer, &create_test_row(1, "JORDAN FEWER", "20-29"))
        .unwrap();

    assert_eq!(
        registry.find_racers_by_name("JORDAN FEWER").unwrap(),
        vec![racer]
    );
    assert!(
        registry
            .find_racers_by_name("Jordan Fewer")
            .unwrap()
            .is_empty()
    );
    assert!(
        registry
            .has_result_for_name_in_race(race, "JORDAN FEWER")
            .unwrap()
    );

    let inputs = registry.historical_window_inputs(racer).unwrap();
    assert_eq!(
        inputs,
        vec![(NaiveDate::from_ymd_opt(2015, 4, 12).unwrap(), "20-29".to_string())]
    );
}

#[test]
fn test_attach_result_to_unknown_racer_fails() {
    let mut registry = RacerRegistry::new();
    let race = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));

    let result = registry.attach_result(race, RacerId(42), &create_test_row(1, "X", "A"));
    assert!(matches!(result, Err(Error::RacerNotFound { id: 42 })));
}

#[test]
fn test_merge_moves_results_and_removes_source() {
    let mut registry = RacerRegistry::new();
    let first = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));
    let second = create_test_race(&mut registry, "b.html", "Harbour", (2015, 5, 3));
    let target = registry.create_racer().unwrap();
    let source = registry.create_racer().unwrap();

    registry
        .attach_result(first, target, &create_test_row(1, "JORDAN FEWER", "20-29"))
        .unwrap();
    registry
        .attach_result(second, source, &create_test_row(4, "J FEWER", "30-39"))
        .unwrap();

    let moved = registry.merge_racers(target, source).unwrap();

    assert_eq!(moved, 1);
    assert_eq!(registry.racer_count(), 1);
    assert_eq!(
        registry.find_racers_by_name("J FEWER").unwrap(),
        vec![target]
    );
    assert_eq!(registry.historical_window_inputs(target).unwrap().len(), 2);
    assert!(matches!(
        registry.historical_window_inputs(source),
        Err(Error::RacerNotFound { .. })
    ));
}

#[test]
fn test_merge_into_self_is_rejected() {
    let mut registry = RacerRegistry::new();
    let racer = registry.create_racer().unwrap();

    assert!(matches!(
        registry.merge_racers(racer, racer),
        Err(Error::DataValidation { .. })
    ));
}

#[test]
fn test_rollback_restores_checkpoint() {
    let mut registry = RacerRegistry::new();
    let kept = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));

    registry.begin_import().unwrap();
    let race = create_test_race(&mut registry, "b.html", "Harbour", (2015, 5, 3));
    let racer = registry.create_racer().unwrap();
    registry
        .attach_result(race, racer, &create_test_row(1, "MEGAN POWER", "20-29"))
        .unwrap();
    registry.rollback_import().unwrap();

    assert_eq!(registry.race_count(), 1);
    assert!(registry.race(kept).is_ok());
    assert_eq!(registry.racer_count(), 0);
    assert!(
        registry
            .find_racers_by_name("MEGAN POWER")
            .unwrap()
            .is_empty()
    );
    assert!(!registry.in_import());
}

#[test]
fn test_transactions_do_not_nest() {
    let mut registry = RacerRegistry::new();

    registry.begin_import().unwrap();
    assert!(matches!(registry.begin_import(), Err(Error::Registry { .. })));
    registry.commit_import().unwrap();
    assert!(matches!(registry.commit_import(), Err(Error::Registry { .. })));
    assert!(matches!(registry.rollback_import(), Err(Error::Registry { .. })));
}

#[test]
fn test_completed_import_tracking() {
    let mut registry = RacerRegistry::new();
    let race = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));

    assert!(!registry.has_completed_import("a.html").unwrap());
    registry.complete_race(race).unwrap();
    assert!(registry.has_completed_import("a.html").unwrap());

    registry
        .record_import("a.html", &ImportOutcome::Completed(race))
        .unwrap();
    registry
        .record_import(
            "b.html",
            &ImportOutcome::Failed("Results not found".to_string()),
        )
        .unwrap();

    let tasks = registry.import_tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].race_id, Some(race));
    assert_eq!(tasks[1].status, ImportStatus::Failed);
    assert_eq!(tasks[1].error_text.as_deref(), Some("Results not found"));
}

#[test]
fn test_remove_source_races() {
    let mut registry = RacerRegistry::new();
    let race = create_test_race(&mut registry, "a.html", "Flat Out", (2015, 4, 12));
    let racer = registry.create_racer().unwrap();
    registry
        .attach_result(race, racer, &create_test_row(1, "JORDAN FEWER", "20-29"))
        .unwrap();

    assert_eq!(registry.remove_source_races("a.html").unwrap(), 1);
    assert_eq!(registry.result_count(), 0);
    assert!(
        !registry
            .has_result_for_name_in_race(race, "JORDAN FEWER")
            .unwrap()
    );
}
