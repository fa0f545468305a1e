use std::fs;

use tempfile::tempdir;

use super::*;
use crate::model::{Gender, McqCategory, StandardGender, TestType};
use crate::standards::StandardQuery;

const SAMPLE: &str = r#"
[[standards]]
test_type = "toe_touch"
gender = "A"
age_min = 18
age_max = 65
excellent = 12.0
good = 2.0
average = -8.0
needs_improvement = -18.0

[[normative]]
test_type = "overall"
gender = "A"
age_min = 20
age_max = 29
p10 = 40.0
p25 = 52.0
p50 = 63.0
p75 = 74.0
p90 = 84.0
source = "club survey"
year = 2024

[[categories]]
category = "knowledge"
name = "Training knowledge"
weight = 1.0

[[questions]]
id = 1
category = "knowledge"
text = "How often should you warm up?"
question_type = "single"
max_points = 10.0

[[questions.choices]]
id = 1
text = "Always"
points = 10.0

[[questions.choices]]
id = 2
text = "Never"
contributes_to_risk = true
risk_weight = 0.5
"#;

#[test]
fn parses_every_table() {
    let data = ReferenceData::from_toml_str(SAMPLE, Path::new("sample.toml")).unwrap();
    assert_eq!(data.standards.len(), 1);
    assert!(data.standards[0].active, "active defaults to true");
    assert_eq!(data.standards[0].thresholds.good, 2.0);
    assert_eq!(data.normative[0].year, Some(2024));
    assert_eq!(data.categories[0].category, McqCategory::Knowledge);
    assert_eq!(data.questions[0].choices.len(), 2);
    assert!(data.questions[0].choices[1].is_risky());
}

#[test]
fn reference_data_serves_all_repositories() {
    let data = ReferenceData::from_toml_str(SAMPLE, Path::new("sample.toml")).unwrap();
    let query = StandardQuery::new(TestType::ToeTouch, Gender::Female, 30);
    assert!(data.resolve(&query).is_some());
    assert!(data.find_row(TestType::Overall, Gender::Male, 25).is_some());
    assert_eq!(data.question(1).map(|q| q.max_points), Some(10.0));
}

#[test]
fn parse_error_names_the_file() {
    let err = ReferenceData::from_toml_str("[[standards]]\nage_min = \"x\"", Path::new("bad.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn toml_round_trip_preserves_data() {
    let data = ReferenceData::from_toml_str(SAMPLE, Path::new("sample.toml")).unwrap();
    let text = data.to_toml_string().unwrap();
    let again = ReferenceData::from_toml_str(&text, Path::new("again.toml")).unwrap();
    assert_eq!(again, data);
}

#[test]
fn seed_document_parses_back_to_builtin_tables() {
    let seeded = ReferenceData {
        standards: builtin_standards(),
        ..Default::default()
    };
    let text = seeded.to_toml_string().unwrap();
    let parsed = ReferenceData::from_toml_str(&text, Path::new("seed.toml")).unwrap();
    assert_eq!(parsed.standards, builtin_standards());
    assert!(validate(&parsed).is_empty());
}

#[test]
fn discover_finds_file_in_ancestor() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(REFERENCE_FILE_NAME), SAMPLE).unwrap();
    let nested = dir.path().join("clients").join("2026");
    fs::create_dir_all(&nested).unwrap();
    assert_eq!(discover(&nested), Some(dir.path().join(REFERENCE_FILE_NAME)));
}

#[test]
fn discover_prefers_nearest_file() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("team");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join(REFERENCE_FILE_NAME), SAMPLE).unwrap();
    fs::write(nested.join(REFERENCE_FILE_NAME), "").unwrap();
    assert_eq!(discover(&nested), Some(nested.join(REFERENCE_FILE_NAME)));
}

#[test]
fn load_explicit_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, SAMPLE).unwrap();
    let data = load(Some(&path)).unwrap();
    assert_eq!(data.standards[0].gender, StandardGender::All);
}

#[test]
fn load_explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load(Some(&dir.path().join("missing.toml"))).unwrap_err();
    assert!(matches!(err, ReferenceError::Io { .. }));
}

#[test]
fn load_explicit_malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[standards]\n").unwrap();
    assert!(matches!(load(Some(&path)), Err(ReferenceError::Parse { .. })));
}

#[test]
fn discovered_malformed_file_falls_back_to_empty() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(REFERENCE_FILE_NAME), "[[standards]\n").unwrap();
    assert_eq!(load_discovered(dir.path()), ReferenceData::default());
}

#[test]
fn discovered_file_is_loaded() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(REFERENCE_FILE_NAME), SAMPLE).unwrap();
    assert_eq!(load_discovered(dir.path()).normative.len(), 1);
}

#[test]
fn run_validate_fix_writes_output() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.toml");
    let output = dir.path().join("out.toml");
    let inverted = SAMPLE.replace("excellent = 12.0", "excellent = -30.0");
    fs::write(&source, inverted).unwrap();

    let clean = run_validate(Some(&source), true, Some(&output), true).unwrap();
    assert!(clean);
    let fixed = ReferenceData::from_file(&output).unwrap();
    assert!(fixed.standards[0].thresholds.is_ordered());
    assert_eq!(fixed.standards[0].thresholds.excellent, 2.0);
}

#[test]
fn run_validate_reports_without_fixing() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.toml");
    let inverted = SAMPLE.replace("excellent = 12.0", "excellent = -30.0");
    fs::write(&source, &inverted).unwrap();

    assert!(!run_validate(Some(&source), false, None, false).unwrap());
    assert_eq!(fs::read_to_string(&source).unwrap(), inverted);
}
