use super::*;
use crate::model::questionnaire::QuestionChoice;
use crate::model::{McqCategory, Question, QuestionCategory, QuestionType, StandardGender, TestType};
use crate::normative::NormativeData;
use crate::standards::{TestStandard, Thresholds};

fn standard(thresholds: Thresholds) -> TestStandard {
    TestStandard::new(TestType::ToeTouch, StandardGender::All, 18, 65, thresholds)
}

fn normative(p: [f64; 5]) -> NormativeData {
    NormativeData {
        test_type: TestType::Overall,
        gender: StandardGender::All,
        age_min: 20,
        age_max: 29,
        p10: p[0],
        p25: p[1],
        p50: p[2],
        p75: p[3],
        p90: p[4],
        source: None,
        year: None,
    }
}

fn category(category: McqCategory, weight: f64) -> QuestionCategory {
    QuestionCategory {
        category,
        name: category.label().to_string(),
        weight,
        order: 0,
    }
}

fn question(max_points: f64, choice_points: f64, risk_weight: f64) -> Question {
    Question {
        id: 7,
        category: McqCategory::Lifestyle,
        text: "Sleep".to_string(),
        question_type: QuestionType::Single,
        max_points,
        choices: vec![QuestionChoice {
            id: 1,
            text: "Little".to_string(),
            points: choice_points,
            contributes_to_risk: true,
            risk_weight,
        }],
    }
}

fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
    issues.iter().map(|i| i.kind).collect()
}

#[test]
fn clean_data_has_no_issues() {
    let data = ReferenceData {
        standards: vec![standard(Thresholds::new(10.0, 0.0, -10.0, -20.0))],
        normative: vec![normative([10.0, 20.0, 30.0, 40.0, 50.0])],
        categories: vec![
            category(McqCategory::Knowledge, 0.4),
            category(McqCategory::Lifestyle, 0.4),
            category(McqCategory::Readiness, 0.2),
        ],
        questions: vec![question(10.0, 5.0, 0.5)],
    };
    assert!(validate(&data).is_empty());
}

#[test]
fn empty_data_is_valid() {
    assert!(validate(&ReferenceData::default()).is_empty());
}

#[test]
fn detects_each_inconsistency() {
    let mut bad_ages = standard(Thresholds::new(10.0, 0.0, -10.0, -20.0));
    bad_ages.age_min = 70;
    let data = ReferenceData {
        standards: vec![standard(Thresholds::new(0.0, 10.0, -10.0, -20.0)), bad_ages],
        normative: vec![normative([10.0, 30.0, 20.0, 40.0, 50.0])],
        categories: vec![category(McqCategory::Knowledge, 1.5)],
        questions: vec![question(10.0, 12.0, 1.2)],
    };
    assert_eq!(
        kinds(&validate(&data)),
        vec![
            IssueKind::InvertedThresholds,
            IssueKind::InvalidAgeRange,
            IssueKind::NonMonotonicPercentiles,
            IssueKind::CategoryWeightOutOfRange,
            IssueKind::CategoryWeightSum,
            IssueKind::RiskWeightOutOfRange,
            IssueKind::PointsExceedMax,
        ]
    );
}

#[test]
fn fix_corrects_fixable_issues() {
    let mut data = ReferenceData {
        standards: vec![standard(Thresholds::new(0.0, 10.0, -10.0, -20.0))],
        normative: vec![normative([10.0, 30.0, 20.0, 40.0, 50.0])],
        categories: vec![
            category(McqCategory::Knowledge, 0.5),
            category(McqCategory::Lifestyle, 0.5),
            category(McqCategory::Readiness, 0.5),
        ],
        questions: vec![question(10.0, 5.0, 1.2)],
    };
    assert_eq!(fix(&mut data), 4);
    assert!(validate(&data).is_empty(), "{:?}", validate(&data));
    assert_eq!(data.standards[0].thresholds, Thresholds::new(10.0, 0.0, -10.0, -20.0));
    assert_eq!(data.normative[0].p25, 20.0);
    assert_eq!(data.normative[0].p50, 30.0);
    assert!((data.categories[0].weight - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(data.questions[0].choices[0].risk_weight, 1.0);
}

#[test]
fn fix_leaves_unfixable_issues() {
    let mut bad_ages = standard(Thresholds::new(10.0, 0.0, -10.0, -20.0));
    bad_ages.age_min = 70;
    let mut data = ReferenceData {
        standards: vec![bad_ages],
        questions: vec![question(10.0, 12.0, 0.5)],
        ..Default::default()
    };
    assert_eq!(fix(&mut data), 0);
    let remaining = validate(&data);
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|i| !i.kind.fixable()));
}

#[test]
fn fix_is_a_no_op_on_clean_data() {
    let mut data = ReferenceData {
        standards: vec![standard(Thresholds::new(10.0, 0.0, -10.0, -20.0))],
        ..Default::default()
    };
    let before = data.clone();
    assert_eq!(fix(&mut data), 0);
    assert_eq!(data, before);
}
