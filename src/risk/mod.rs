//! Injury risk: weak categories set a baseline, movement-quality flags add
//! capped penalties, and the total is clamped to 0–100.
//!
//! Every flag that adds points is also itemized as a [`RiskFactor`], so the
//! score and its explanation never disagree. The calculation is pure; the
//! pipeline writes the result into the assessment.

mod factor;
mod report;
pub mod summary;

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::category::{CategoryScores, overall_score};
use crate::model::RawMeasurements;
use crate::physical::{balance_asymmetry, shoulder_asymmetry};
use crate::pipeline::store::load_assessment;
use crate::walk;

pub use factor::{RiskFactor, RiskSource};
pub use report::{print_json, print_report};
pub use summary::summarize;

/// Share of the inverted category score that becomes baseline risk.
pub const BASELINE_FACTOR: f64 = 0.5;

pub const PENALTY_SQUAT_PAIN: f64 = 15.0;
pub const PENALTY_KNEE_VALGUS: f64 = 10.0;
pub const PENALTY_FORWARD_LEAN: f64 = 7.0;
pub const PENALTY_HEEL_LIFT: f64 = 5.0;
pub const PENALTY_SHOULDER_PAIN: f64 = 15.0;

/// Left/right fist-gap difference (cm) from which asymmetry counts.
pub const SHOULDER_ASYMMETRY_THRESHOLD_CM: f64 = 5.0;
const SHOULDER_ASYMMETRY_PER_CM: f64 = 1.0;
const SHOULDER_ASYMMETRY_CAP: f64 = 10.0;

/// Left/right held-time difference (s) from which asymmetry counts.
pub const BALANCE_ASYMMETRY_THRESHOLD_S: f64 = 5.0;
const BALANCE_ASYMMETRY_PER_S: f64 = 0.5;
const BALANCE_ASYMMETRY_CAP: f64 = 10.0;

/// Qualitative band of an injury risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Moderate, Self::High, Self::VeryHigh];

    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Self::Low
        } else if score < 50.0 {
            Self::Moderate
        } else if score < 75.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Movement-quality observations that feed the risk penalties.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementFlags {
    pub squat_pain: bool,
    pub knee_valgus: bool,
    pub forward_lean: bool,
    pub heel_lift: bool,
    pub shoulder_pain: bool,
    pub shoulder_asymmetry_cm: Option<f64>,
    pub balance_asymmetry_s: Option<f64>,
}

impl MovementFlags {
    pub fn from_measurements(m: &RawMeasurements) -> Self {
        let squat = m.overhead_squat.unwrap_or_default();
        Self {
            squat_pain: squat.pain,
            knee_valgus: squat.knee_valgus,
            forward_lean: squat.forward_lean,
            heel_lift: squat.heel_lift,
            shoulder_pain: m.shoulder_mobility.is_some_and(|s| s.pain),
            shoulder_asymmetry_cm: m.shoulder_mobility.as_ref().and_then(shoulder_asymmetry),
            balance_asymmetry_s: m.single_leg_balance.as_ref().and_then(balance_asymmetry),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskInputs {
    pub categories: CategoryScores,
    pub overall: Option<f64>,
    pub flags: MovementFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjuryRisk {
    pub score: f64,
    pub baseline: f64,
    pub factors: Vec<RiskFactor>,
}

/// Baseline from the inverted weighted category mean, or from the overall
/// score when no category is present.
fn baseline(inputs: &RiskInputs) -> f64 {
    let clamped = CategoryScores {
        strength: inputs.categories.strength.map(|s| s.clamp(0.0, 100.0)),
        mobility: inputs.categories.mobility.map(|s| s.clamp(0.0, 100.0)),
        balance: inputs.categories.balance.map(|s| s.clamp(0.0, 100.0)),
        cardio: inputs.categories.cardio.map(|s| s.clamp(0.0, 100.0)),
    };
    overall_score(&clamped)
        .or(inputs.overall.filter(|o| o.is_finite()))
        .map_or(0.0, |fitness| (100.0 - fitness.clamp(0.0, 100.0)) * BASELINE_FACTOR)
}

fn asymmetry_penalty(magnitude: Option<f64>, threshold: f64, per_unit: f64, cap: f64) -> Option<f64> {
    magnitude
        .filter(|m| m.is_finite() && *m >= threshold)
        .map(|m| (m * per_unit).min(cap))
}

pub fn calculate_injury_risk(inputs: &RiskInputs) -> InjuryRisk {
    let flags = &inputs.flags;
    let mut factors = Vec::new();

    let boolean_flags = [
        (flags.squat_pain, "movement", "squat_pain", "pain during overhead squat", PENALTY_SQUAT_PAIN),
        (flags.knee_valgus, "movement", "knee_valgus", "knees cave inward during squat", PENALTY_KNEE_VALGUS),
        (flags.forward_lean, "movement", "forward_lean", "excessive forward lean during squat", PENALTY_FORWARD_LEAN),
        (flags.heel_lift, "movement", "heel_lift", "heels lift during squat", PENALTY_HEEL_LIFT),
        (flags.shoulder_pain, "mobility", "shoulder_pain", "pain during shoulder mobility test", PENALTY_SHOULDER_PAIN),
    ];
    for (present, category, name, detail, penalty) in boolean_flags {
        if present {
            factors.push(RiskFactor::physical(category, name, detail, penalty));
        }
    }

    if let Some(penalty) = asymmetry_penalty(
        flags.shoulder_asymmetry_cm,
        SHOULDER_ASYMMETRY_THRESHOLD_CM,
        SHOULDER_ASYMMETRY_PER_CM,
        SHOULDER_ASYMMETRY_CAP,
    ) {
        let gap = flags.shoulder_asymmetry_cm.unwrap_or_default();
        factors.push(RiskFactor::physical(
            "mobility",
            "shoulder_asymmetry",
            format!("{gap:.1} cm difference between sides"),
            penalty,
        ));
    }
    if let Some(penalty) = asymmetry_penalty(
        flags.balance_asymmetry_s,
        BALANCE_ASYMMETRY_THRESHOLD_S,
        BALANCE_ASYMMETRY_PER_S,
        BALANCE_ASYMMETRY_CAP,
    ) {
        let gap = flags.balance_asymmetry_s.unwrap_or_default();
        factors.push(RiskFactor::physical(
            "balance",
            "balance_asymmetry",
            format!("{gap:.1} s difference between legs"),
            penalty,
        ));
    }

    let baseline = baseline(inputs);
    let penalties: f64 = factors.iter().map(|f| f.weight).sum();
    InjuryRisk {
        score: (baseline + penalties).clamp(0.0, 100.0),
        baseline,
        factors,
    }
}

/// `fitscore risks` entry point: summarize stored risk across assessment files.
pub fn run(
    paths: &[PathBuf],
    exclude: &[String],
    json: bool,
    top: usize,
) -> Result<(), Box<dyn Error>> {
    let files = walk::assessment_files(paths, exclude)?;
    let mut assessments = Vec::with_capacity(files.len());
    for path in &files {
        match load_assessment(path) {
            Ok(a) => assessments.push(a),
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }
    info!(files = files.len(), loaded = assessments.len(), "risk summary");

    let summary = summarize(&assessments);
    if json {
        print_json(&summary, top)?;
    } else {
        print_report(&summary, top);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
