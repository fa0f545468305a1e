//! Risk-factor analytics across many scored assessments.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{RiskLevel, RiskSource};
use crate::model::Assessment;

/// How often one named factor appeared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorCount {
    pub source: RiskSource,
    pub category: String,
    pub name: String,
    pub count: usize,
    pub mean_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: RiskLevel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub assessments_analyzed: usize,
    pub assessments_with_risk: usize,
    pub mean_injury_risk: Option<f64>,
    pub levels: Vec<LevelCount>,
    /// Most frequent first; ties ordered by source, then name.
    pub factors: Vec<FactorCount>,
}

pub fn summarize<'a>(assessments: impl IntoIterator<Item = &'a Assessment>) -> RiskSummary {
    let mut analyzed = 0;
    let mut risk_scores = Vec::new();
    let mut by_factor: BTreeMap<(RiskSource, String), (String, usize, f64)> = BTreeMap::new();

    for a in assessments {
        analyzed += 1;
        if let Some(score) = a.scores.injury_risk.value().filter(|s| s.is_finite()) {
            risk_scores.push(score);
        }
        for f in &a.scores.risk_factors {
            let entry = by_factor
                .entry((f.source, f.name.clone()))
                .or_insert_with(|| (f.category.clone(), 0, 0.0));
            entry.1 += 1;
            entry.2 += f.weight;
        }
    }

    let levels = RiskLevel::ALL
        .iter()
        .map(|&level| LevelCount {
            level,
            count: risk_scores
                .iter()
                .filter(|&&s| RiskLevel::from_score(s) == level)
                .count(),
        })
        .collect();

    let mean_injury_risk = if risk_scores.is_empty() {
        None
    } else {
        Some(risk_scores.iter().sum::<f64>() / risk_scores.len() as f64)
    };

    let mut factors: Vec<FactorCount> = by_factor
        .into_iter()
        .map(|((source, name), (category, count, weight_sum))| FactorCount {
            source,
            category,
            name,
            count,
            mean_weight: weight_sum / count as f64,
        })
        .collect();
    // BTreeMap order already breaks ties by (source, name); the sort is stable.
    factors.sort_by(|a, b| b.count.cmp(&a.count));

    RiskSummary {
        assessments_analyzed: analyzed,
        assessments_with_risk: risk_scores.len(),
        mean_injury_risk,
        levels,
        factors,
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
