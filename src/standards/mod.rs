//! Configurable per-test scoring thresholds.
//!
//! Standards are keyed by test type, gender (`M`, `F` or `A` for all),
//! an inclusive age band and an optional variation/conditions pair. A lookup
//! walks three tiers of specificity and the first match wins:
//!
//! 1. exact gender with the exact variation/conditions,
//! 2. gender `A` with the exact variation/conditions,
//! 3. exact gender, then `A`, with no variation and no conditions.
//!
//! When nothing resolves the physical scorer falls back to its built-in
//! tables, so a lookup miss never fails a score.

use serde::{Deserialize, Serialize};

use crate::model::{Gender, StandardGender, TestType};

/// Four descending cut-offs, each inclusive at its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
    pub needs_improvement: f64,
}

impl Thresholds {
    pub const fn new(excellent: f64, good: f64, average: f64, needs_improvement: f64) -> Self {
        Self {
            excellent,
            good,
            average,
            needs_improvement,
        }
    }

    /// Ordinal grade: 4 at or above excellent, 3 at or above good,
    /// 2 at or above average, otherwise 1.
    pub fn score(&self, value: f64) -> u8 {
        if value >= self.excellent {
            4
        } else if value >= self.good {
            3
        } else if value >= self.average {
            2
        } else {
            1
        }
    }

    /// Every threshold multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.excellent * factor,
            self.good * factor,
            self.average * factor,
            self.needs_improvement * factor,
        )
    }

    /// excellent ≥ good ≥ average ≥ needs_improvement.
    pub fn is_ordered(&self) -> bool {
        self.excellent >= self.good
            && self.good >= self.average
            && self.average >= self.needs_improvement
    }

    /// The same values sorted into descending order.
    pub fn sorted(&self) -> Self {
        let mut v = [
            self.excellent,
            self.good,
            self.average,
            self.needs_improvement,
        ];
        v.sort_by(|a, b| b.total_cmp(a));
        Self::new(v[0], v[1], v[2], v[3])
    }
}

fn default_active() -> bool {
    true
}

/// One administered threshold row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStandard {
    pub test_type: TestType,
    pub gender: StandardGender,
    pub age_min: u32,
    pub age_max: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl TestStandard {
    pub fn new(
        test_type: TestType,
        gender: StandardGender,
        age_min: u32,
        age_max: u32,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            test_type,
            gender,
            age_min,
            age_max,
            variation_type: None,
            conditions: None,
            thresholds,
            description: None,
            active: true,
        }
    }

    pub fn with_variation(mut self, variation: &str) -> Self {
        self.variation_type = Some(variation.to_string());
        self
    }

    pub fn with_conditions(mut self, conditions: &str) -> Self {
        self.conditions = Some(conditions.to_string());
        self
    }

    pub fn covers_age(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }

    fn is_generic(&self) -> bool {
        self.variation_type.is_none() && self.conditions.is_none()
    }
}

/// Grade `value` against a resolved standard.
pub fn score_for_value(standard: &TestStandard, value: f64) -> u8 {
    standard.thresholds.score(value)
}

/// What a scorer asks the repository for.
#[derive(Debug, Clone, Copy)]
pub struct StandardQuery<'a> {
    pub test_type: TestType,
    pub gender: Gender,
    pub age: u32,
    pub variation_type: Option<&'a str>,
    pub conditions: Option<&'a str>,
}

impl<'a> StandardQuery<'a> {
    pub fn new(test_type: TestType, gender: Gender, age: u32) -> Self {
        Self {
            test_type,
            gender,
            age,
            variation_type: None,
            conditions: None,
        }
    }

    pub fn variation(mut self, variation: &'a str) -> Self {
        self.variation_type = Some(variation);
        self
    }

    pub fn conditions(mut self, conditions: &'a str) -> Self {
        self.conditions = Some(conditions);
        self
    }
}

/// Read-only source of standards injected into the scorers.
pub trait StandardsRepository {
    fn standards(&self) -> &[TestStandard];

    fn resolve(&self, query: &StandardQuery<'_>) -> Option<&TestStandard> {
        resolve(self.standards(), query)
    }
}

impl StandardsRepository for [TestStandard] {
    fn standards(&self) -> &[TestStandard] {
        self
    }
}

impl StandardsRepository for Vec<TestStandard> {
    fn standards(&self) -> &[TestStandard] {
        self
    }
}

/// Resolve the most specific active standard for `query`.
pub fn resolve<'s>(standards: &'s [TestStandard], query: &StandardQuery<'_>) -> Option<&'s TestStandard> {
    let candidates: Vec<&TestStandard> = standards
        .iter()
        .filter(|s| s.active && s.test_type == query.test_type && s.covers_age(query.age))
        .collect();

    let gender = StandardGender::from(query.gender);
    let exact_key = |s: &TestStandard| {
        s.variation_type.as_deref() == query.variation_type
            && s.conditions.as_deref() == query.conditions
    };
    let find = |g: StandardGender, keyed: &dyn Fn(&TestStandard) -> bool| {
        candidates.iter().copied().find(|s| s.gender == g && keyed(*s))
    };

    find(gender, &exact_key)
        .or_else(|| find(StandardGender::All, &exact_key))
        .or_else(|| find(gender, &TestStandard::is_generic))
        .or_else(|| find(StandardGender::All, &TestStandard::is_generic))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
