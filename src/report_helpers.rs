use std::path::Path;

use serde::Serialize;

/// Compute the max display width for paths, with a minimum of `min`.
pub fn max_path_width<'a>(paths: impl Iterator<Item = &'a Path>, min: usize) -> usize {
    paths
        .map(|p| p.display().to_string().len())
        .max()
        .unwrap_or(min)
        .max(min)
}

/// Print a horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Serialize to pretty JSON and print to stdout.
pub fn print_json_stdout(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-decimal display of an optional score; `-` when absent.
/// Scores are stored at full precision and only rounded here.
pub fn fmt_score(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Display of an optional signed delta, e.g. `+4.2`.
pub fn fmt_delta(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:+.1}"))
}

/// Display of an optional ordinal test grade with its scale, e.g. `3/4`.
pub fn fmt_ordinal(value: Option<u8>, max: u8) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}/{max}"))
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
