//! Error types for the scoring engine and its file-backed collaborators.
//!
//! Scoring errors never reach the trainer: the pipeline turns each one into a
//! logged step failure and keeps the assessment fully populated. Reference and
//! assessment errors belong to the loading/persistence edges.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while scoring a single test, category or composite.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A raw measurement that the data-entry boundary should have rejected.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A measurement that is NaN or infinite.
    #[error("non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// No reference row resolved for the lookup. Grading reports it and falls
    /// back to the built-in tables.
    #[error("no reference data for {0}")]
    MissingReferenceData(String),
}

impl ScoringError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Require a finite measurement, otherwise report which field was bad.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { field, value })
    }
}

/// Failure loading or writing the reference-data document.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize reference data: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failure loading or persisting an assessment file.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("failed to read assessment {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse assessment {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize assessment: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to persist assessment {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
