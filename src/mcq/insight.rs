//! Canned recommendations per questionnaire category and score tier.

use serde::Serialize;

use crate::model::McqCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTier {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl InsightTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs attention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInsight {
    pub category: McqCategory,
    pub score: f64,
    pub tier: InsightTier,
    pub recommendations: &'static [&'static str],
}

/// Lower bound of the `Fair` tier; readiness is held to a lower bar.
fn fair_threshold(category: McqCategory) -> f64 {
    match category {
        McqCategory::Knowledge | McqCategory::Lifestyle => 70.0,
        McqCategory::Readiness => 60.0,
    }
}

pub fn tier_for(category: McqCategory, score: f64) -> InsightTier {
    if score >= 90.0 {
        InsightTier::Excellent
    } else if score >= 80.0 {
        InsightTier::Good
    } else if score >= fair_threshold(category) {
        InsightTier::Fair
    } else {
        InsightTier::NeedsAttention
    }
}

fn recommendations(category: McqCategory, tier: InsightTier) -> &'static [&'static str] {
    use InsightTier::*;
    use McqCategory::*;
    match (category, tier) {
        (Knowledge, Excellent) => &[
            "Strong grasp of training principles; introduce advanced programming concepts",
        ],
        (Knowledge, Good) => &[
            "Review progressive overload and recovery basics",
            "Explain the purpose of each block in the program",
        ],
        (Knowledge, Fair) => &[
            "Schedule a short education session on exercise fundamentals",
            "Share written guidance on warm-up and cool-down",
        ],
        (Knowledge, NeedsAttention) => &[
            "Start with supervised sessions and clear technique cues",
            "Cover safety basics before increasing training load",
            "Revisit the questionnaire after four weeks",
        ],
        (Lifestyle, Excellent) => &["Maintain current sleep, nutrition and activity habits"],
        (Lifestyle, Good) => &[
            "Fine-tune sleep consistency",
            "Add light activity on rest days",
        ],
        (Lifestyle, Fair) => &[
            "Set a regular sleep schedule",
            "Reduce long sedentary periods",
            "Review hydration and meal timing",
        ],
        (Lifestyle, NeedsAttention) => &[
            "Prioritise sleep and stress management before intensity",
            "Agree on one small daily habit change",
            "Consider referral for nutrition or health advice",
        ],
        (Readiness, Excellent) => &["Ready for a structured progressive program"],
        (Readiness, Good) => &[
            "Confirm weekly availability and goals",
            "Plan check-ins to keep momentum",
        ],
        (Readiness, Fair) => &[
            "Start with a reduced weekly commitment",
            "Set short-term, measurable goals",
        ],
        (Readiness, NeedsAttention) => &[
            "Discuss barriers to training before committing to a plan",
            "Check for medical clearance where indicated",
            "Begin with low-intensity sessions",
        ],
    }
}

/// Tier and recommendations for one category score. Presentation only.
pub fn category_insight(category: McqCategory, score: f64) -> CategoryInsight {
    let tier = tier_for(category, score);
    CategoryInsight {
        category,
        score,
        tier,
        recommendations: recommendations(category, tier),
    }
}

#[cfg(test)]
#[path = "insight_test.rs"]
mod tests;
