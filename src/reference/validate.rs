//! Offline consistency checks over reference data, with optional correction.
//!
//! None of this runs while scoring: inconsistent tables are reported to the
//! operator, and only `--fix` changes them.

use std::fmt;

use serde::Serialize;

use super::ReferenceData;

/// Allowed drift of the category weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    InvertedThresholds,
    InvalidAgeRange,
    NonMonotonicPercentiles,
    CategoryWeightOutOfRange,
    CategoryWeightSum,
    RiskWeightOutOfRange,
    PointsExceedMax,
}

impl IssueKind {
    /// Whether [`fix`] can correct this kind of issue.
    pub fn fixable(self) -> bool {
        !matches!(self, Self::InvalidAgeRange | Self::PointsExceedMax)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub location: String,
    pub message: String,
}

impl Issue {
    fn new(kind: IssueKind, location: String, message: String) -> Self {
        Self {
            kind,
            location,
            message,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

fn check_standards(data: &ReferenceData, issues: &mut Vec<Issue>) {
    for (i, s) in data.standards.iter().enumerate() {
        let location = format!("standards[{i}] {} {}", s.test_type, s.gender.as_str());
        if !s.thresholds.is_ordered() {
            let t = &s.thresholds;
            issues.push(Issue::new(
                IssueKind::InvertedThresholds,
                location.clone(),
                format!(
                    "thresholds must be non-increasing, got {} / {} / {} / {}",
                    t.excellent, t.good, t.average, t.needs_improvement
                ),
            ));
        }
        if s.age_min > s.age_max {
            issues.push(Issue::new(
                IssueKind::InvalidAgeRange,
                location,
                format!("age_min {} exceeds age_max {}", s.age_min, s.age_max),
            ));
        }
    }
}

fn check_normative(data: &ReferenceData, issues: &mut Vec<Issue>) {
    for (i, n) in data.normative.iter().enumerate() {
        let location = format!("normative[{i}] {} {}", n.test_type, n.gender.as_str());
        if !n.is_monotonic() {
            issues.push(Issue::new(
                IssueKind::NonMonotonicPercentiles,
                location.clone(),
                format!(
                    "percentile markers must be non-decreasing, got {} / {} / {} / {} / {}",
                    n.p10, n.p25, n.p50, n.p75, n.p90
                ),
            ));
        }
        if n.age_min > n.age_max {
            issues.push(Issue::new(
                IssueKind::InvalidAgeRange,
                location,
                format!("age_min {} exceeds age_max {}", n.age_min, n.age_max),
            ));
        }
    }
}

fn in_unit_range(w: f64) -> bool {
    (0.0..=1.0).contains(&w)
}

fn check_questionnaire(data: &ReferenceData, issues: &mut Vec<Issue>) {
    for c in &data.categories {
        if !in_unit_range(c.weight) {
            issues.push(Issue::new(
                IssueKind::CategoryWeightOutOfRange,
                format!("categories.{}", c.category),
                format!("weight must be between 0.0 and 1.0, got {}", c.weight),
            ));
        }
    }
    if !data.categories.is_empty() {
        let sum: f64 = data.categories.iter().map(|c| c.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            issues.push(Issue::new(
                IssueKind::CategoryWeightSum,
                "categories".to_string(),
                format!("weights must sum to 1.0, but sum to {sum:.3}"),
            ));
        }
    }

    for q in &data.questions {
        for c in &q.choices {
            let location = format!("questions[{}].choices[{}]", q.id, c.id);
            if !in_unit_range(c.risk_weight) {
                issues.push(Issue::new(
                    IssueKind::RiskWeightOutOfRange,
                    location.clone(),
                    format!("risk_weight must be between 0.0 and 1.0, got {}", c.risk_weight),
                ));
            }
            if c.points > q.max_points {
                issues.push(Issue::new(
                    IssueKind::PointsExceedMax,
                    location,
                    format!("points {} exceed the question's max_points {}", c.points, q.max_points),
                ));
            }
        }
    }
}

/// Every inconsistency in `data`, in document order per table.
pub fn validate(data: &ReferenceData) -> Vec<Issue> {
    let mut issues = Vec::new();
    check_standards(data, &mut issues);
    check_normative(data, &mut issues);
    check_questionnaire(data, &mut issues);
    issues
}

fn sort_markers(n: &mut crate::normative::NormativeData) {
    let mut v = [n.p10, n.p25, n.p50, n.p75, n.p90];
    v.sort_by(f64::total_cmp);
    [n.p10, n.p25, n.p50, n.p75, n.p90] = v;
}

/// Correct every fixable issue in place. Returns the number of rows changed.
pub fn fix(data: &mut ReferenceData) -> usize {
    let mut changed = 0;

    for s in &mut data.standards {
        if !s.thresholds.is_ordered() {
            s.thresholds = s.thresholds.sorted();
            changed += 1;
        }
    }

    for n in &mut data.normative {
        if !n.is_monotonic() {
            sort_markers(n);
            changed += 1;
        }
    }

    for c in &mut data.categories {
        if !in_unit_range(c.weight) {
            c.weight = if c.weight.is_finite() { c.weight.clamp(0.0, 1.0) } else { 0.0 };
            changed += 1;
        }
    }
    let sum: f64 = data.categories.iter().map(|c| c.weight).sum();
    if sum > 0.0 && (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        for c in &mut data.categories {
            c.weight /= sum;
        }
        changed += 1;
    }

    for q in &mut data.questions {
        for c in &mut q.choices {
            if !in_unit_range(c.risk_weight) {
                c.risk_weight = if c.risk_weight.is_finite() {
                    c.risk_weight.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                changed += 1;
            }
        }
    }

    changed
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
