use std::path::Path;

use serde::Serialize;

use super::validate::Issue;
use crate::report_helpers;

/// Print validation issues, one per line, grouped under their location.
pub fn print_report(source: &Path, issues: &[Issue], fixed: usize) {
    let separator = report_helpers::separator(72);
    println!("Reference data: {}", source.display());
    println!("{separator}");
    if issues.is_empty() {
        println!(" No issues found.");
    } else {
        for issue in issues {
            let mark = if issue.kind.fixable() { "fixable" } else { "manual" };
            println!(" [{mark:<7}] {issue}");
        }
    }
    println!("{separator}");
    let fixable = issues.iter().filter(|i| i.kind.fixable()).count();
    println!(
        " {} issue(s), {fixable} fixable, {fixed} row(s) corrected",
        issues.len()
    );
}

#[derive(Serialize)]
struct JsonValidation<'a> {
    source: String,
    issues: &'a [Issue],
    fixed: usize,
}

pub fn print_json(
    source: &Path,
    issues: &[Issue],
    fixed: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&JsonValidation {
        source: source.display().to_string(),
        issues,
        fixed,
    })
}
