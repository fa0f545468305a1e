//! Bulk recalculation over assessment files.
//!
//! Each file is its own unit of work: load, score, write atomically. A file
//! that fails is logged and counted, and the batch moves on. Nothing is
//! retried.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ScoringEngine;
use super::store::{load_assessment, save_assessment};
use crate::error::AssessmentError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Scoring steps that failed inside otherwise successful files.
    pub step_failures: usize,
    pub failed: Vec<BatchFailure>,
}

enum FileOutcome {
    Updated { step_failures: usize },
    Unchanged { step_failures: usize },
}

fn recalculate_file(
    engine: &ScoringEngine<'_>,
    path: &Path,
    dry_run: bool,
) -> Result<FileOutcome, AssessmentError> {
    let mut assessment = load_assessment(path)?;
    let before = assessment.clone();
    let step_failures = engine.apply(&mut assessment).len();

    if assessment == before {
        return Ok(FileOutcome::Unchanged { step_failures });
    }
    if !dry_run {
        save_assessment(path, &assessment)?;
    }
    Ok(FileOutcome::Updated { step_failures })
}

/// Rescore every file. With `dry_run` nothing is written, but changes are
/// still counted.
pub fn recalculate(engine: &ScoringEngine<'_>, files: &[PathBuf], dry_run: bool) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for path in files {
        summary.processed += 1;
        match recalculate_file(engine, path, dry_run) {
            Ok(FileOutcome::Updated { step_failures }) => {
                debug!(path = %path.display(), "updated");
                summary.updated += 1;
                summary.step_failures += step_failures;
            }
            Ok(FileOutcome::Unchanged { step_failures }) => {
                summary.unchanged += 1;
                summary.step_failures += step_failures;
            }
            Err(err) => {
                warn!("{err}");
                summary.failed.push(BatchFailure {
                    path: path.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
    info!(
        processed = summary.processed,
        updated = summary.updated,
        failed = summary.failed.len(),
        dry_run,
        "batch recalculation finished"
    );
    summary
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
