use chrono::NaiveDate;

use super::*;
use crate::model::{AssessmentScores, Client, Gender, Scored};
use crate::risk::RiskFactor;

fn assessment(risk: Option<f64>, factors: Vec<RiskFactor>) -> Assessment {
    Assessment {
        id: None,
        client: Client {
            name: None,
            age: 35,
            gender: Gender::Female,
        },
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        conditions: Default::default(),
        measurements: Default::default(),
        responses: vec![],
        scores: AssessmentScores {
            injury_risk: Scored::Computed(risk),
            risk_factors: factors,
            ..Default::default()
        },
    }
}

fn valgus() -> RiskFactor {
    RiskFactor::physical("movement", "knee_valgus", "knees cave", 10.0)
}

#[test]
fn summarize_empty() {
    let s = summarize(&Vec::<Assessment>::new());
    assert_eq!(s.assessments_analyzed, 0);
    assert_eq!(s.mean_injury_risk, None);
    assert!(s.factors.is_empty());
    assert_eq!(s.levels.len(), 4);
    assert!(s.levels.iter().all(|l| l.count == 0));
}

#[test]
fn summarize_counts_levels_and_mean() {
    let all = vec![
        assessment(Some(10.0), vec![]),
        assessment(Some(40.0), vec![valgus()]),
        assessment(Some(90.0), vec![valgus()]),
        assessment(None, vec![]),
    ];
    let s = summarize(&all);
    assert_eq!(s.assessments_analyzed, 4);
    assert_eq!(s.assessments_with_risk, 3);
    assert!((s.mean_injury_risk.unwrap() - 140.0 / 3.0).abs() < 1e-9);
    let counts: Vec<usize> = s.levels.iter().map(|l| l.count).collect();
    assert_eq!(counts, vec![1, 1, 0, 1]);
}

#[test]
fn summarize_orders_factors_by_frequency() {
    let sleep = RiskFactor::mcq("lifestyle", "How many hours do you sleep?", "Under 5", 0.8);
    let sleep_lighter = RiskFactor::mcq("lifestyle", "How many hours do you sleep?", "5-6", 0.4);
    let all = vec![
        assessment(Some(30.0), vec![valgus(), sleep]),
        assessment(Some(30.0), vec![sleep_lighter]),
        assessment(Some(30.0), vec![]),
    ];
    let s = summarize(&all);
    assert_eq!(s.factors.len(), 2);
    assert_eq!(s.factors[0].count, 2);
    assert_eq!(s.factors[0].source, RiskSource::Mcq);
    assert!((s.factors[0].mean_weight - 0.6).abs() < 1e-9);
    assert_eq!(s.factors[1].name, "knee_valgus");
}

#[test]
fn summarize_ties_break_by_source_then_name() {
    let heel = RiskFactor::physical("movement", "heel_lift", "heels lift", 5.0);
    let all = vec![assessment(Some(20.0), vec![valgus(), heel])];
    let s = summarize(&all);
    let names: Vec<&str> = s.factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["heel_lift", "knee_valgus"]);
}
