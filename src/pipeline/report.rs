//! Report formatters for `score`, `batch` and `diff`.
//!
//! Table output for people and JSON for tooling. Diff deltas are colored
//! green for improvements and red for regressions; for injury risk a drop is
//! the improvement.

use serde::Serialize;

use super::{AssessmentDiff, BatchSummary, FieldDelta, OverallStanding, StepFailure};
use crate::category::{W_BALANCE, W_CARDIO, W_MOBILITY, W_STRENGTH};
use crate::mcq::CategoryInsight;
use crate::model::{Assessment, AssessmentScores, Scored, TestType};
use crate::normative::{PercentileResult, PerformanceAge};
use crate::physical::{MOVEMENT_SCALE_MAX, PERFORMANCE_SCALE_MAX};
use crate::report_helpers::{self, fmt_delta, fmt_ordinal, fmt_score};
use crate::risk::{RiskFactor, RiskLevel};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// `*` marks a trainer-overridden value.
fn mark<T>(field: &Scored<T>) -> &'static str {
    match field {
        Scored::Overridden(_) => "*",
        Scored::Computed(_) => "",
    }
}

fn test_rows(s: &AssessmentScores) -> [(TestType, &Scored<u8>, u8); 7] {
    [
        (TestType::OverheadSquat, &s.overhead_squat, MOVEMENT_SCALE_MAX),
        (TestType::PushUp, &s.push_up, PERFORMANCE_SCALE_MAX),
        (TestType::SingleLegBalance, &s.single_leg_balance, PERFORMANCE_SCALE_MAX),
        (TestType::ToeTouch, &s.toe_touch, PERFORMANCE_SCALE_MAX),
        (TestType::ShoulderMobility, &s.shoulder_mobility, MOVEMENT_SCALE_MAX),
        (TestType::FarmerCarry, &s.farmer_carry, PERFORMANCE_SCALE_MAX),
        (TestType::HarvardStepTest, &s.harvard_step_test, PERFORMANCE_SCALE_MAX),
    ]
}

fn print_factor(f: &RiskFactor) {
    println!("   - {f}");
}

pub fn print_report(
    assessment: &Assessment,
    standing: &OverallStanding,
    insights: &[CategoryInsight],
    failures: &[StepFailure],
) {
    let separator = report_helpers::separator(64);
    let s = &assessment.scores;
    let client = &assessment.client;

    println!(
        "Assessment: {BOLD}{}{RESET} ({}, {})  {}",
        client.name.as_deref().unwrap_or("-"),
        client.gender,
        client.age,
        assessment.date
    );
    println!("{separator}");
    println!(" {:<24} {:>8}", "Test", "Grade");
    println!("{separator}");
    for (test, field, max) in test_rows(s) {
        let extra = match (test, s.harvard_pfi) {
            (TestType::HarvardStepTest, Some(pfi)) => format!("  PFI {pfi:.1}"),
            _ => String::new(),
        };
        println!(
            " {:<24} {:>7}{:<1}{extra}",
            test.label(),
            fmt_ordinal(field.value(), max),
            mark(field)
        );
    }

    println!("{separator}");
    println!(" {:<24} {:>8} {:>8}", "Category", "Weight", "Score");
    println!("{separator}");
    for (name, weight, field) in [
        ("Strength", W_STRENGTH, &s.strength),
        ("Mobility", W_MOBILITY, &s.mobility),
        ("Balance", W_BALANCE, &s.balance),
        ("Cardio", W_CARDIO, &s.cardio),
    ] {
        println!(
            " {name:<24} {:>7.0}% {:>8}{}",
            weight * 100.0,
            fmt_score(field.value()),
            mark(field)
        );
    }
    println!(
        " {BOLD}{:<24}{RESET} {:>8} {:>8}{}",
        "Overall",
        "",
        fmt_score(s.overall.value()),
        mark(&s.overall)
    );

    println!("{separator}");
    match s.injury_risk.value() {
        Some(risk) => println!(
            " Injury risk: {risk:.1}{} ({})",
            mark(&s.injury_risk),
            RiskLevel::from_score(risk).label()
        ),
        None => println!(" Injury risk: -"),
    }
    for f in &s.risk_factors {
        print_factor(f);
    }

    println!("{separator}");
    println!(
        " Knowledge: {}{}   Lifestyle: {}{}   Readiness: {}{}",
        fmt_score(s.knowledge.value()),
        mark(&s.knowledge),
        fmt_score(s.lifestyle.value()),
        mark(&s.lifestyle),
        fmt_score(s.readiness.value()),
        mark(&s.readiness),
    );
    println!(
        " {BOLD}Comprehensive: {}{}{RESET}",
        fmt_score(s.comprehensive.value()),
        mark(&s.comprehensive)
    );

    if let Some(p) = &standing.percentile {
        println!("{separator}");
        println!(
            " Overall percentile: {:.1}  ({})",
            p.percentile,
            p.source.as_deref().unwrap_or("-")
        );
    }
    if let Some(pa) = &standing.performance_age {
        println!(
            " Performance age: {:.1} ({:+.1})  {}",
            pa.performance_age,
            pa.age_difference,
            pa.tier.label()
        );
    }

    for insight in insights {
        println!("{separator}");
        println!(
            " {} {:.1}: {}",
            insight.category.label(),
            insight.score,
            insight.tier.label()
        );
        for r in insight.recommendations {
            println!("   - {r}");
        }
    }

    if !failures.is_empty() {
        println!("{separator}");
        for f in failures {
            println!(" {YELLOW}warning{RESET}: {} kept its prior value: {}", f.field, f.error);
        }
    }
    println!("{separator}");
    if [
        s.overall.is_overridden(),
        s.injury_risk.is_overridden(),
        s.comprehensive.is_overridden(),
    ]
    .contains(&true)
        || test_rows(s).iter().any(|(_, f, _)| f.is_overridden())
    {
        println!(" * overridden by trainer");
    }
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    field: &'a str,
    error: String,
}

#[derive(Serialize)]
struct JsonScoreReport<'a> {
    client: &'a crate::model::Client,
    date: chrono::NaiveDate,
    scores: &'a AssessmentScores,
    injury_risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overall_percentile: Option<&'a PercentileResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performance_age: Option<&'a PerformanceAge>,
    insights: &'a [CategoryInsight],
    failures: Vec<JsonFailure<'a>>,
}

pub fn print_json(
    assessment: &Assessment,
    standing: &OverallStanding,
    insights: &[CategoryInsight],
    failures: &[StepFailure],
) -> Result<(), Box<dyn std::error::Error>> {
    let report = JsonScoreReport {
        client: &assessment.client,
        date: assessment.date,
        scores: &assessment.scores,
        injury_risk_level: assessment
            .scores
            .injury_risk
            .value()
            .map(RiskLevel::from_score),
        overall_percentile: standing.percentile.as_ref(),
        performance_age: standing.performance_age.as_ref(),
        insights,
        failures: failures
            .iter()
            .map(|f| JsonFailure {
                field: f.field,
                error: f.error.to_string(),
            })
            .collect(),
    };
    report_helpers::print_json_stdout(&report)
}

// --- batch ---

pub fn print_batch_report(summary: &BatchSummary, dry_run: bool) {
    let separator = report_helpers::separator(64);
    let title = if dry_run {
        "Batch recalculation (dry run)"
    } else {
        "Batch recalculation"
    };
    println!("{title}");
    println!("{separator}");
    println!(
        " Processed: {}  Updated: {}  Unchanged: {}  Failed: {}",
        summary.processed,
        summary.updated,
        summary.unchanged,
        summary.failed.len()
    );
    if summary.step_failures > 0 {
        println!(" Scoring steps kept prior values: {}", summary.step_failures);
    }
    if !summary.failed.is_empty() {
        println!("{separator}");
        let width =
            report_helpers::max_path_width(summary.failed.iter().map(|f| f.path.as_path()), 8);
        for f in &summary.failed {
            println!(
                " {RED}failed{RESET} {:<width$}  {}",
                f.path.display().to_string(),
                f.error
            );
        }
    }
    println!("{separator}");
}

pub fn print_batch_json(summary: &BatchSummary) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(summary)
}

// --- diff ---

/// Signed delta with color; `higher_is_better` picks which sign is green.
fn colored_delta(delta: Option<f64>, higher_is_better: bool) -> String {
    match delta {
        None => "-".to_string(),
        Some(d) if d.abs() < 0.05 => format!("{YELLOW} 0.0{RESET}"),
        Some(d) => {
            let color = if (d > 0.0) == higher_is_better { GREEN } else { RED };
            format!("{color}{}{RESET}", fmt_delta(Some(d)))
        }
    }
}

fn print_delta_row(label: &str, d: &FieldDelta, higher_is_better: bool) {
    println!(
        " {label:<24} {:>8}   {:>8}   {}",
        fmt_score(d.before),
        fmt_score(d.after),
        colored_delta(d.delta, higher_is_better)
    );
}

pub fn print_diff_report(diff: &AssessmentDiff) {
    let separator = report_helpers::separator(64);
    println!(
        "Assessment Diff {BOLD}{}{RESET} → {BOLD}{}{RESET}",
        diff.before_date, diff.after_date
    );
    println!("{separator}");
    println!(" {:<24} {:>8}   {:>8}   Delta", "Field", "Before", "After");
    println!("{separator}");
    for d in &diff.tests {
        let label = d
            .name
            .parse::<TestType>()
            .map_or(d.name, |t| t.label());
        print_delta_row(label, d, true);
    }
    println!("{separator}");
    for d in &diff.categories {
        print_delta_row(d.name, d, true);
    }
    print_delta_row("overall", &diff.overall, true);
    println!("{separator}");
    for d in &diff.questionnaire {
        print_delta_row(d.name, d, true);
    }
    print_delta_row("comprehensive", &diff.comprehensive, true);
    println!("{separator}");
    print_delta_row("injury risk", &diff.injury_risk, false);
    let level = |l: Option<RiskLevel>| l.map_or("-", RiskLevel::label);
    println!(
        " Risk level: {} → {}",
        level(diff.before_level),
        level(diff.after_level)
    );
    for f in &diff.factors_added {
        println!("   {RED}+{RESET} {f}");
    }
    for f in &diff.factors_resolved {
        println!("   {GREEN}-{RESET} {f}");
    }
    println!("{separator}");
}

pub fn print_diff_json(diff: &AssessmentDiff) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(diff)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
