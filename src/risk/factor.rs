use std::fmt;

use serde::{Deserialize, Serialize};

/// Which scoring domain produced a risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSource {
    Physical,
    Mcq,
}

impl RiskSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Mcq => "mcq",
        }
    }
}

/// One named contributor to injury or questionnaire-derived risk.
///
/// Serialized as `{category, question_or_flag_name, detail,
/// weight_or_severity, source_tag}`. Physical factors carry the points they
/// added to the injury risk score; questionnaire factors carry the choice's
/// risk weight in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: String,
    #[serde(rename = "question_or_flag_name")]
    pub name: String,
    pub detail: String,
    #[serde(rename = "weight_or_severity")]
    pub weight: f64,
    #[serde(rename = "source_tag")]
    pub source: RiskSource,
}

impl RiskFactor {
    pub fn physical(category: &str, flag: &str, detail: impl Into<String>, severity: f64) -> Self {
        Self {
            category: category.to_string(),
            name: flag.to_string(),
            detail: detail.into(),
            weight: severity,
            source: RiskSource::Physical,
        }
    }

    pub fn mcq(category: &str, question: &str, detail: impl Into<String>, weight: f64) -> Self {
        Self {
            category: category.to_string(),
            name: question.to_string(),
            detail: detail.into(),
            weight,
            source: RiskSource::Mcq,
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.source.as_str(), self.name, self.detail)
    }
}
