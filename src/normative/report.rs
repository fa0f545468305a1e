use serde::Serialize;

use super::{PercentileResult, PerformanceAge};
use crate::model::TestType;
use crate::report_helpers;

/// Print a percentile lookup. Missing reference data prints a zeroed result.
pub fn print_report(
    test_type: TestType,
    score: f64,
    result: Option<&PercentileResult>,
    perf_age: Option<&PerformanceAge>,
) {
    let separator = report_helpers::separator(56);
    println!("Percentile: {}", test_type.label());
    println!("{separator}");
    println!(" Score:       {score:.1}");
    match result {
        Some(r) => {
            println!(" Percentile:  {:.1}", r.percentile);
            println!(" Source:      {}", r.source.as_deref().unwrap_or("-"));
            println!(
                " Year:        {}",
                r.year.map_or_else(|| "-".to_string(), |y| y.to_string())
            );
        }
        None => println!(" Percentile:  0.0 (no normative data)"),
    }
    if let Some(pa) = perf_age {
        println!("{separator}");
        println!(" Performance age: {:.1}", pa.performance_age);
        println!(" Age difference:  {:+.1}", pa.age_difference);
        println!(" {}", pa.tier.label());
    }
    println!("{separator}");
}

#[derive(Serialize)]
struct JsonPercentile<'a> {
    test_type: TestType,
    score: f64,
    percentile: f64,
    source: Option<&'a str>,
    year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performance_age: Option<&'a PerformanceAge>,
}

/// Serialize a percentile lookup as `{percentile, source, year}`.
pub fn print_json(
    test_type: TestType,
    score: f64,
    result: Option<&PercentileResult>,
    perf_age: Option<&PerformanceAge>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = JsonPercentile {
        test_type,
        score,
        percentile: result.map_or(0.0, |r| r.percentile),
        source: result.and_then(|r| r.source.as_deref()),
        year: result.and_then(|r| r.year),
        performance_age: perf_age,
    };
    report_helpers::print_json_stdout(&json)
}
