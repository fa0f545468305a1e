use chrono::NaiveDate;

use super::*;
use crate::model::assessment::PushUpVariation;
use crate::model::{AssessmentScores, Client, Gender, PushUp, Scored};

fn sample() -> Assessment {
    let mut a = Assessment {
        id: Some(7),
        client: Client {
            name: Some("Ana".to_string()),
            age: 42,
            gender: Gender::Female,
        },
        date: NaiveDate::from_ymd_opt(2026, 5, 12).unwrap(),
        conditions: Default::default(),
        measurements: Default::default(),
        responses: vec![],
        scores: AssessmentScores::default(),
    };
    a.measurements.push_up = Some(PushUp {
        reps: 12,
        variation: PushUpVariation::Modified,
    });
    a.scores.push_up = Scored::Overridden(3);
    a.scores.strength = Scored::Computed(Some(2.0 / 3.0 * 100.0));
    a
}

#[test]
fn save_then_load_preserves_assessment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ana.json");
    let a = sample();
    save_assessment(&path, &a).unwrap();
    assert_eq!(load_assessment(&path).unwrap(), a);
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ana.json");
    save_assessment(&path, &sample()).unwrap();
    save_assessment(&path, &sample()).unwrap();
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("ana.json")]);
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ana.json");
    fs::write(&path, "stale").unwrap();
    save_assessment(&path, &sample()).unwrap();
    assert_eq!(load_assessment(&path).unwrap().id, Some(7));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_assessment(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, AssessmentError::Io { .. }));
}

#[test]
fn malformed_file_is_parse_error_naming_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    let err = load_assessment(&path).unwrap_err();
    assert!(matches!(err, AssessmentError::Parse { .. }));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn minimal_document_loads_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("min.json");
    fs::write(
        &path,
        r#"{"client": {"age": 30, "gender": "M"}, "date": "2026-01-02"}"#,
    )
    .unwrap();
    let a = load_assessment(&path).unwrap();
    assert_eq!(a.client.age, 30);
    assert!(a.responses.is_empty());
    assert_eq!(a.scores, AssessmentScores::default());
}

#[test]
fn write_atomic_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");
    assert!(write_atomic(&path, b"{}").is_err());
    assert!(!path.exists());
}
