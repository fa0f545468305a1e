//! One assessment snapshot: raw measurements in, computed fields out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Environment, Gender, QuestionResponse, Scored};
use crate::risk::RiskFactor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub age: u32,
    pub gender: Gender,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TestConditions {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverheadSquat {
    #[serde(default)]
    pub pain: bool,
    #[serde(default)]
    pub knee_valgus: bool,
    #[serde(default)]
    pub forward_lean: bool,
    #[serde(default)]
    pub heel_lift: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushUpVariation {
    #[default]
    Standard,
    Modified,
    Wall,
}

impl PushUpVariation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Modified => "modified",
            Self::Wall => "wall",
        }
    }

    /// Fraction of the standard rep thresholds expected for this variation.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Modified => 0.7,
            Self::Wall => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushUp {
    pub reps: u32,
    #[serde(default)]
    pub variation: PushUpVariation,
}

/// Held time in seconds per side and visual condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleLegBalance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eyes_open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eyes_open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eyes_closed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eyes_closed: Option<f64>,
}

/// Reach relative to the toes in cm; positive is past the toes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToeTouch {
    pub distance_cm: f64,
}

/// Gap between the fists behind the back, per side on top, in cm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoulderMobility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_gap_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_gap_cm: Option<f64>,
    #[serde(default)]
    pub pain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarmerCarry {
    pub duration_seconds: f64,
    #[serde(default = "default_percent_bodyweight")]
    pub percent_bodyweight: f64,
}

fn default_percent_bodyweight() -> f64 {
    100.0
}

/// Step duration plus heart rate (bpm) sampled at 1–1.5, 2–2.5 and 3–3.5 min.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvardStep {
    #[serde(default = "default_step_duration")]
    pub duration_seconds: f64,
    pub hr1: f64,
    pub hr2: f64,
    pub hr3: f64,
}

fn default_step_duration() -> f64 {
    300.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_squat: Option<OverheadSquat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_up: Option<PushUp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_leg_balance: Option<SingleLegBalance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toe_touch: Option<ToeTouch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_mobility: Option<ShoulderMobility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_carry: Option<FarmerCarry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harvard_step: Option<HarvardStep>,
}

/// Every field the engine writes back. Replaced as a whole by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentScores {
    pub overhead_squat: Scored<u8>,
    pub push_up: Scored<u8>,
    pub single_leg_balance: Scored<u8>,
    pub toe_touch: Scored<u8>,
    pub shoulder_mobility: Scored<u8>,
    pub farmer_carry: Scored<u8>,
    pub harvard_step_test: Scored<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvard_pfi: Option<f64>,

    pub strength: Scored<f64>,
    pub mobility: Scored<f64>,
    pub balance: Scored<f64>,
    pub cardio: Scored<f64>,
    pub overall: Scored<f64>,

    pub injury_risk: Scored<f64>,
    pub risk_factors: Vec<RiskFactor>,

    pub knowledge: Scored<f64>,
    pub lifestyle: Scored<f64>,
    pub readiness: Scored<f64>,
    pub comprehensive: Scored<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub client: Client,
    pub date: NaiveDate,
    #[serde(default)]
    pub conditions: TestConditions,
    #[serde(default)]
    pub measurements: RawMeasurements,
    #[serde(default)]
    pub responses: Vec<QuestionResponse>,
    #[serde(default)]
    pub scores: AssessmentScores,
}
