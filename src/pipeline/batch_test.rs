use std::fs;

use chrono::NaiveDate;

use super::*;
use crate::model::assessment::PushUpVariation;
use crate::model::{Assessment, Client, Gender, PushUp};
use crate::reference::ReferenceData;

fn assessment(reps: u32) -> Assessment {
    let mut a = Assessment {
        id: None,
        client: Client {
            name: None,
            age: 35,
            gender: Gender::Male,
        },
        date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        conditions: Default::default(),
        measurements: Default::default(),
        responses: vec![],
        scores: Default::default(),
    };
    a.measurements.push_up = Some(PushUp {
        reps,
        variation: PushUpVariation::Standard,
    });
    a
}

fn write(path: &Path, a: &Assessment) {
    fs::write(path, serde_json::to_string_pretty(a).unwrap()).unwrap();
}

#[test]
fn rescored_files_are_written_and_failures_counted() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = dir.path().join("a.json");
    let good_b = dir.path().join("b.json");
    let bad = dir.path().join("c.json");
    write(&good_a, &assessment(30));
    write(&good_b, &assessment(10));
    fs::write(&bad, "{ broken").unwrap();

    let reference = ReferenceData::default();
    let engine = ScoringEngine::new(&reference);
    let files = vec![good_a.clone(), good_b, bad.clone()];
    let summary = recalculate(&engine, &files, false);

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.unchanged, 0);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].path, bad);

    let rescored = load_assessment(&good_a).unwrap();
    assert_eq!(rescored.scores.push_up.value(), Some(4));
    assert_eq!(fs::read_to_string(&bad).unwrap(), "{ broken");
}

#[test]
fn second_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.json");
    write(&path, &assessment(25));

    let reference = ReferenceData::default();
    let engine = ScoringEngine::new(&reference);
    let files = vec![path.clone()];
    recalculate(&engine, &files, false);
    let first = fs::read_to_string(&path).unwrap();

    let summary = recalculate(&engine, &files, false);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn dry_run_counts_but_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.json");
    write(&path, &assessment(25));
    let original = fs::read_to_string(&path).unwrap();

    let reference = ReferenceData::default();
    let engine = ScoringEngine::new(&reference);
    let summary = recalculate(&engine, &[path.clone()], true);

    assert_eq!(summary.updated, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn empty_file_list_is_empty_summary() {
    let reference = ReferenceData::default();
    let engine = ScoringEngine::new(&reference);
    assert_eq!(recalculate(&engine, &[], false), BatchSummary::default());
}
