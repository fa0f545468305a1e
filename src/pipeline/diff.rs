//! Pairwise comparison of two scored assessments.
//!
//! Produces before/after/delta for every test grade, category, the overall
//! and comprehensive scores, injury risk and the questionnaire categories,
//! plus which risk factors appeared or went away.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Assessment, AssessmentScores, McqCategory, TestType};
use crate::risk::RiskLevel;

/// One field before and after. `delta` needs both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDelta {
    pub name: &'static str,
    pub before: Option<f64>,
    pub after: Option<f64>,
    pub delta: Option<f64>,
}

impl FieldDelta {
    fn new(name: &'static str, before: Option<f64>, after: Option<f64>) -> Self {
        let delta = match (before, after) {
            (Some(b), Some(a)) => Some(a - b),
            _ => None,
        };
        Self {
            name,
            before,
            after,
            delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentDiff {
    pub before_date: NaiveDate,
    pub after_date: NaiveDate,
    pub tests: Vec<FieldDelta>,
    pub categories: Vec<FieldDelta>,
    pub overall: FieldDelta,
    pub injury_risk: FieldDelta,
    pub before_level: Option<RiskLevel>,
    pub after_level: Option<RiskLevel>,
    pub questionnaire: Vec<FieldDelta>,
    pub comprehensive: FieldDelta,
    pub factors_added: Vec<String>,
    pub factors_resolved: Vec<String>,
}

fn test_grades(s: &AssessmentScores) -> [(TestType, Option<u8>); 7] {
    [
        (TestType::OverheadSquat, s.overhead_squat.value()),
        (TestType::PushUp, s.push_up.value()),
        (TestType::SingleLegBalance, s.single_leg_balance.value()),
        (TestType::ToeTouch, s.toe_touch.value()),
        (TestType::ShoulderMobility, s.shoulder_mobility.value()),
        (TestType::FarmerCarry, s.farmer_carry.value()),
        (TestType::HarvardStepTest, s.harvard_step_test.value()),
    ]
}

fn category_values(s: &AssessmentScores) -> [(&'static str, Option<f64>); 4] {
    [
        ("strength", s.strength.value()),
        ("mobility", s.mobility.value()),
        ("balance", s.balance.value()),
        ("cardio", s.cardio.value()),
    ]
}

fn questionnaire_values(s: &AssessmentScores) -> [(McqCategory, Option<f64>); 3] {
    [
        (McqCategory::Knowledge, s.knowledge.value()),
        (McqCategory::Lifestyle, s.lifestyle.value()),
        (McqCategory::Readiness, s.readiness.value()),
    ]
}

fn factor_keys(s: &AssessmentScores) -> BTreeSet<String> {
    s.risk_factors
        .iter()
        .map(|f| format!("{}: {}", f.source.as_str(), f.name))
        .collect()
}

pub fn compute_diff(before: &Assessment, after: &Assessment) -> AssessmentDiff {
    let (b, a) = (&before.scores, &after.scores);

    let tests = test_grades(b)
        .into_iter()
        .zip(test_grades(a))
        .map(|((t, bv), (_, av))| {
            FieldDelta::new(t.as_str(), bv.map(f64::from), av.map(f64::from))
        })
        .collect();
    let categories = category_values(b)
        .into_iter()
        .zip(category_values(a))
        .map(|((name, bv), (_, av))| FieldDelta::new(name, bv, av))
        .collect();
    let questionnaire = questionnaire_values(b)
        .into_iter()
        .zip(questionnaire_values(a))
        .map(|((c, bv), (_, av))| FieldDelta::new(c.as_str(), bv, av))
        .collect();

    let (before_factors, after_factors) = (factor_keys(b), factor_keys(a));

    AssessmentDiff {
        before_date: before.date,
        after_date: after.date,
        tests,
        categories,
        overall: FieldDelta::new("overall", b.overall.value(), a.overall.value()),
        injury_risk: FieldDelta::new("injury_risk", b.injury_risk.value(), a.injury_risk.value()),
        before_level: b.injury_risk.value().map(RiskLevel::from_score),
        after_level: a.injury_risk.value().map(RiskLevel::from_score),
        questionnaire,
        comprehensive: FieldDelta::new(
            "comprehensive",
            b.comprehensive.value(),
            a.comprehensive.value(),
        ),
        factors_added: after_factors.difference(&before_factors).cloned().collect(),
        factors_resolved: before_factors.difference(&after_factors).cloned().collect(),
    }
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
