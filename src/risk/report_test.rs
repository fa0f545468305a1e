use super::*;
use crate::risk::{RiskLevel, RiskSource};

fn sample_summary() -> RiskSummary {
    RiskSummary {
        assessments_analyzed: 3,
        assessments_with_risk: 2,
        mean_injury_risk: Some(37.5),
        levels: RiskLevel::ALL
            .iter()
            .map(|&level| LevelCount { level, count: 1 })
            .collect(),
        factors: vec![
            FactorCount {
                source: RiskSource::Physical,
                category: "movement".to_string(),
                name: "knee_valgus".to_string(),
                count: 2,
                mean_weight: 10.0,
            },
            FactorCount {
                source: RiskSource::Mcq,
                category: "lifestyle".to_string(),
                name: "How many hours of sleep do you get on a typical weeknight?".to_string(),
                count: 1,
                mean_weight: 0.8,
            },
        ],
    }
}

#[test]
fn print_report_does_not_panic() {
    print_report(&sample_summary(), 10);
}

#[test]
fn print_report_truncated() {
    print_report(&sample_summary(), 1);
}

#[test]
fn print_report_without_factors() {
    let mut s = sample_summary();
    s.factors.clear();
    print_report(&s, 10);
}

#[test]
fn print_json_does_not_panic() {
    print_json(&sample_summary(), 10).unwrap();
    print_json(&sample_summary(), 0).unwrap();
}

#[test]
fn truncate_long_names() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
}

#[test]
fn json_structure_is_valid() {
    let s = sample_summary();
    let json = JsonRiskSummary {
        assessments_analyzed: s.assessments_analyzed,
        assessments_with_risk: s.assessments_with_risk,
        mean_injury_risk: s.mean_injury_risk,
        levels: &s.levels,
        factors: &s.factors,
    };
    let value = serde_json::to_value(&json).unwrap();
    assert_eq!(value["factors"][0]["source"], "physical");
    assert_eq!(value["levels"][3]["level"], "very_high");
}
