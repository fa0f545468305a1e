use serde::Serialize;

use super::summary::{FactorCount, LevelCount, RiskSummary};
use crate::report_helpers;

/// Print the risk summary as a table, truncated to the `top` factors.
pub fn print_report(summary: &RiskSummary, top: usize) {
    let separator = report_helpers::separator(72);
    println!("Risk Summary");
    println!("{separator}");
    println!(
        " Assessments: {}  with injury risk: {}  mean risk: {}",
        summary.assessments_analyzed,
        summary.assessments_with_risk,
        report_helpers::fmt_score(summary.mean_injury_risk),
    );
    println!("{separator}");
    for LevelCount { level, count } in &summary.levels {
        println!(" {:<12} {count:>6}", level.label());
    }

    if summary.factors.is_empty() {
        println!("{separator}");
        println!(" No risk factors recorded.");
        println!("{separator}");
        return;
    }

    println!("{separator}");
    println!(
        " {:<9} {:<10} {:<36} {:>5} {:>7}",
        "Source", "Category", "Factor", "Count", "Weight"
    );
    println!("{separator}");
    for f in summary.factors.iter().take(top) {
        println!(
            " {:<9} {:<10} {:<36} {:>5} {:>7.2}",
            f.source.as_str(),
            f.category,
            truncate(&f.name, 36),
            f.count,
            f.mean_weight,
        );
    }
    if summary.factors.len() > top {
        println!(" ... {} more", summary.factors.len() - top);
    }
    println!("{separator}");
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[derive(Serialize)]
struct JsonRiskSummary<'a> {
    assessments_analyzed: usize,
    assessments_with_risk: usize,
    mean_injury_risk: Option<f64>,
    levels: &'a [LevelCount],
    factors: &'a [FactorCount],
}

pub fn print_json(summary: &RiskSummary, top: usize) -> Result<(), Box<dyn std::error::Error>> {
    let shown = top.min(summary.factors.len());
    let json = JsonRiskSummary {
        assessments_analyzed: summary.assessments_analyzed,
        assessments_with_risk: summary.assessments_with_risk,
        mean_injury_risk: summary.mean_injury_risk,
        levels: &summary.levels,
        factors: &summary.factors[..shown],
    };
    report_helpers::print_json_stdout(&json)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
