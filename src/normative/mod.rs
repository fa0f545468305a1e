//! Population percentile bands and the derived "performance age".
//!
//! Each normative row stores five markers (p10, p25, p50, p75, p90) for one
//! test/gender/age band. A raw score is placed on the band by piecewise linear
//! interpolation between adjacent markers and clamped to [10, 90]. Missing
//! reference data yields `None`; these calls never fail.

mod report;

use std::error::Error;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Gender, StandardGender, TestType};
use crate::reference;

pub use report::{print_json, print_report};

/// Percentile lookups within this many points of a row's median count as a match.
pub const MEDIAN_TOLERANCE: f64 = 5.0;

/// One population distribution row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeData {
    pub test_type: TestType,
    pub gender: StandardGender,
    pub age_min: u32,
    pub age_max: u32,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl NormativeData {
    /// (percentile, marker score) pairs in ascending percentile order.
    pub fn markers(&self) -> [(f64, f64); 5] {
        [
            (10.0, self.p10),
            (25.0, self.p25),
            (50.0, self.p50),
            (75.0, self.p75),
            (90.0, self.p90),
        ]
    }

    pub fn covers_age(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }

    pub fn age_midpoint(&self) -> f64 {
        (f64::from(self.age_min) + f64::from(self.age_max)) / 2.0
    }

    /// Markers are non-decreasing (required for a meaningful interpolation).
    pub fn is_monotonic(&self) -> bool {
        self.markers().windows(2).all(|w| w[0].1 <= w[1].1)
    }
}

/// Read-only source of normative rows injected into the engine.
pub trait NormativeRepository {
    fn normative(&self) -> &[NormativeData];

    /// Row for the exact gender, falling back to gender `A`.
    fn find_row(&self, test_type: TestType, gender: Gender, age: u32) -> Option<&NormativeData> {
        let rows = self.normative();
        let matching = move |g: StandardGender| {
            rows.iter()
                .find(|r| r.test_type == test_type && r.gender == g && r.covers_age(age))
        };
        matching(gender.into()).or_else(|| matching(StandardGender::All))
    }
}

impl NormativeRepository for Vec<NormativeData> {
    fn normative(&self) -> &[NormativeData] {
        self
    }
}

/// Percentile rank of `score` on `row`, in [10, 90].
pub fn percentile(row: &NormativeData, score: f64) -> f64 {
    let markers = row.markers();
    let (first_pct, first_score) = markers[0];
    let (last_pct, last_score) = markers[4];

    if score.is_nan() || score <= first_score {
        return first_pct;
    }
    if score >= last_score {
        return last_pct;
    }
    for w in markers.windows(2) {
        let (lower_pct, lower_score) = w[0];
        let (upper_pct, upper_score) = w[1];
        if score <= upper_score {
            let span = upper_score - lower_score;
            if span == 0.0 {
                return lower_pct;
            }
            return lower_pct + (score - lower_score) / span * (upper_pct - lower_pct);
        }
    }
    last_pct
}

/// Result of a percentile lookup, with provenance of the row used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileResult {
    pub test_type: TestType,
    pub score: f64,
    pub percentile: f64,
    pub source: Option<String>,
    pub year: Option<i32>,
}

/// Resolve the normative row for the client and rank `score` on it.
pub fn lookup_percentile<R: NormativeRepository + ?Sized>(
    repo: &R,
    test_type: TestType,
    score: f64,
    age: u32,
    gender: Gender,
) -> Option<PercentileResult> {
    let Some(row) = repo.find_row(test_type, gender, age) else {
        debug!(%test_type, age, %gender, "no normative row");
        return None;
    };
    Some(PercentileResult {
        test_type,
        score,
        percentile: percentile(row, score),
        source: row.source.clone(),
        year: row.year,
    })
}

/// Qualitative reading of chronological age minus performance age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeTier {
    MuchYounger,
    Younger,
    SlightlyYounger,
    SlightlyOlder,
    Older,
    MuchOlder,
}

impl AgeTier {
    /// Positive difference means the client performs like someone younger.
    pub fn from_difference(age_difference: f64) -> Self {
        if age_difference >= 10.0 {
            Self::MuchYounger
        } else if age_difference >= 5.0 {
            Self::Younger
        } else if age_difference >= 0.0 {
            Self::SlightlyYounger
        } else if age_difference >= -5.0 {
            Self::SlightlyOlder
        } else if age_difference >= -10.0 {
            Self::Older
        } else {
            Self::MuchOlder
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MuchYounger => "Excellent: performing well below chronological age",
            Self::Younger => "Very good: performing younger than chronological age",
            Self::SlightlyYounger => "Good: performing at or slightly below chronological age",
            Self::SlightlyOlder => "Fair: performing slightly above chronological age",
            Self::Older => "Needs work: performing older than chronological age",
            Self::MuchOlder => "Priority: performing well above chronological age",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAge {
    pub performance_age: f64,
    pub chronological_age: u32,
    pub age_difference: f64,
    pub tier: AgeTier,
}

/// Age whose population the score is typical of.
///
/// Scans the age-ordered rows for `test_type`; the first row whose median is
/// within [`MEDIAN_TOLERANCE`] of `score`, or whose interquartile range
/// contains it, gives its age midpoint. Scores above the youngest row's p75
/// map to that row's `age_min`, scores below the oldest row's p25 to its
/// `age_max`.
pub fn performance_age<R: NormativeRepository + ?Sized>(
    repo: &R,
    test_type: TestType,
    score: f64,
    age: u32,
    gender: Gender,
) -> Option<PerformanceAge> {
    if !score.is_finite() {
        return None;
    }
    let rows = rows_for(repo, test_type, gender);
    let youngest = rows.first()?;
    let oldest = rows.last()?;

    let matched = rows
        .iter()
        .find(|r| (r.p50 - score).abs() <= MEDIAN_TOLERANCE || (r.p25 <= score && score <= r.p75))
        .map(|r| r.age_midpoint());

    let performance_age = match matched {
        Some(a) => a,
        None if score > youngest.p75 => f64::from(youngest.age_min),
        None if score < oldest.p25 => f64::from(oldest.age_max),
        None => return None,
    };
    let age_difference = f64::from(age) - performance_age;

    Some(PerformanceAge {
        performance_age,
        chronological_age: age,
        age_difference,
        tier: AgeTier::from_difference(age_difference),
    })
}

/// Age-ordered rows for one test: exact-gender rows when any exist, else `A`.
fn rows_for<R: NormativeRepository + ?Sized>(
    repo: &R,
    test_type: TestType,
    gender: Gender,
) -> Vec<&NormativeData> {
    let of_gender = move |g: StandardGender| {
        repo.normative()
            .iter()
            .filter(|r| r.test_type == test_type && r.gender == g)
            .collect::<Vec<_>>()
    };
    let mut rows = of_gender(gender.into());
    if rows.is_empty() {
        rows = of_gender(StandardGender::All);
    }
    rows.sort_by_key(|r| (r.age_min, r.age_max));
    rows
}

/// `fitscore percentile` entry point.
pub fn run(
    reference_path: Option<&std::path::Path>,
    test_type: TestType,
    score: f64,
    age: u32,
    gender: Gender,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let data = reference::load(reference_path)?;
    let result = lookup_percentile(&data, test_type, score, age, gender);
    let perf_age = performance_age(&data, test_type, score, age, gender);

    if json {
        print_json(test_type, score, result.as_ref(), perf_age.as_ref())?;
    } else {
        print_report(test_type, score, result.as_ref(), perf_age.as_ref());
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
