//! Shared vocabulary of the engine: demographics, the fixed test taxonomy,
//! assessments with their computed fields, and questionnaire types.

pub mod assessment;
pub mod questionnaire;
mod scored;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use assessment::{
    Assessment, AssessmentScores, Client, FarmerCarry, HarvardStep, OverheadSquat, PushUp,
    RawMeasurements, ShoulderMobility, SingleLegBalance, ToeTouch,
};
pub use questionnaire::{McqCategory, Question, QuestionCategory, QuestionResponse, QuestionType};
pub use scored::Scored;

/// Client gender as recorded on the client profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Self::Male),
            "F" | "FEMALE" => Ok(Self::Female),
            other => Err(format!("unknown gender {other:?} (expected M or F)")),
        }
    }
}

/// Gender key on reference rows. `All` applies to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "A")]
    All,
}

impl StandardGender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::All => "A",
        }
    }
}

impl From<Gender> for StandardGender {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
        }
    }
}

/// The seven physical tests plus the derived overall score, which only
/// appears as a key on normative rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    OverheadSquat,
    PushUp,
    SingleLegBalance,
    ToeTouch,
    ShoulderMobility,
    FarmerCarry,
    HarvardStepTest,
    Overall,
}

impl TestType {
    pub const PHYSICAL: [TestType; 7] = [
        Self::OverheadSquat,
        Self::PushUp,
        Self::SingleLegBalance,
        Self::ToeTouch,
        Self::ShoulderMobility,
        Self::FarmerCarry,
        Self::HarvardStepTest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OverheadSquat => "overhead_squat",
            Self::PushUp => "push_up",
            Self::SingleLegBalance => "single_leg_balance",
            Self::ToeTouch => "toe_touch",
            Self::ShoulderMobility => "shoulder_mobility",
            Self::FarmerCarry => "farmer_carry",
            Self::HarvardStepTest => "harvard_step_test",
            Self::Overall => "overall",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OverheadSquat => "Overhead Squat",
            Self::PushUp => "Push-up",
            Self::SingleLegBalance => "Single-leg Balance",
            Self::ToeTouch => "Toe Touch",
            Self::ShoulderMobility => "Shoulder Mobility",
            Self::FarmerCarry => "Farmer's Carry",
            Self::HarvardStepTest => "Harvard Step Test",
            Self::Overall => "Overall",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        [Self::Overall]
            .into_iter()
            .chain(Self::PHYSICAL)
            .find(|t| t.as_str() == key)
            .ok_or_else(|| format!("unknown test type {s:?}"))
    }
}

/// Where the assessment was performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Indoor,
    Outdoor,
}
