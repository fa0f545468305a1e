use std::fmt;

use serde::{Deserialize, Serialize};

/// The three questionnaire domains blended into the comprehensive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McqCategory {
    Knowledge,
    Lifestyle,
    Readiness,
}

impl McqCategory {
    pub const ALL: [McqCategory; 3] = [Self::Knowledge, Self::Lifestyle, Self::Readiness];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Lifestyle => "lifestyle",
            Self::Readiness => "readiness",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge",
            Self::Lifestyle => "Lifestyle",
            Self::Readiness => "Readiness",
        }
    }
}

impl fmt::Display for McqCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting metadata for a questionnaire category. The weight is only used
/// for intra-questionnaire reporting, never for the comprehensive score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCategory {
    pub category: McqCategory,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    Multiple,
    Scale,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionChoice {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub contributes_to_risk: bool,
    #[serde(default)]
    pub risk_weight: f64,
}

impl QuestionChoice {
    pub fn is_risky(&self) -> bool {
        self.contributes_to_risk && self.risk_weight > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub category: McqCategory,
    pub text: String,
    pub question_type: QuestionType,
    pub max_points: f64,
    #[serde(default)]
    pub choices: Vec<QuestionChoice>,
}

impl Question {
    pub fn choice(&self, id: u32) -> Option<&QuestionChoice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

/// One answer on one assessment; unique per (assessment, question).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: u32,
    #[serde(default)]
    pub selected_choices: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
    #[serde(default)]
    pub points_earned: f64,
}
