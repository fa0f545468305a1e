//! Reference data: standards, normative rows and questionnaire definitions,
//! read from one TOML document.
//!
//! ```toml
//! [[standards]]
//! test_type = "push_up"
//! gender = "M"
//! age_min = 20
//! age_max = 29
//! variation_type = "standard"
//! excellent = 36.0
//! good = 29.0
//! average = 22.0
//! needs_improvement = 17.0
//!
//! [[normative]]
//! test_type = "overall"
//! gender = "A"
//! age_min = 20
//! age_max = 29
//! p10 = 40.0
//! p25 = 52.0
//! p50 = 63.0
//! p75 = 74.0
//! p90 = 84.0
//! ```
//!
//! The document is located by an explicit path or by searching the current
//! directory and its ancestors for [`REFERENCE_FILE_NAME`]. Without one, every
//! test scores from the built-in tables.

mod report;
pub mod validate;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ReferenceError;
use crate::mcq::QuestionBank;
use crate::model::{Question, QuestionCategory};
use crate::normative::{NormativeData, NormativeRepository};
use crate::physical::tables::builtin_standards;
use crate::pipeline::store::write_atomic;
use crate::standards::{StandardsRepository, TestStandard};

pub use validate::{fix, validate};

pub const REFERENCE_FILE_NAME: &str = "fitscore.toml";

/// Directories searched upward from the working directory, itself included.
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// An immutable snapshot of every reference table the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub standards: Vec<TestStandard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub normative: Vec<NormativeData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<QuestionCategory>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
}

impl ReferenceData {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ReferenceError> {
        toml::from_str(contents).map_err(|source| ReferenceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ReferenceError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceError> {
        let contents = fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_toml_str(&contents, path)?;
        debug!(
            path = %path.display(),
            standards = data.standards.len(),
            normative = data.normative.len(),
            questions = data.questions.len(),
            "loaded reference data"
        );
        Ok(data)
    }
}

impl StandardsRepository for ReferenceData {
    fn standards(&self) -> &[TestStandard] {
        &self.standards
    }
}

impl NormativeRepository for ReferenceData {
    fn normative(&self) -> &[NormativeData] {
        &self.normative
    }
}

impl QuestionBank for ReferenceData {
    fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// `start` and up to `max_depth - 1` of its ancestors, nearest first.
fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Nearest [`REFERENCE_FILE_NAME`] at or above `start`.
pub fn discover(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(REFERENCE_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load from `explicit` if given (errors propagate), else from a discovered
/// file (errors are logged and ignored), else an empty reference set.
pub fn load(explicit: Option<&Path>) -> Result<ReferenceData, ReferenceError> {
    if let Some(path) = explicit {
        return ReferenceData::from_file(path);
    }
    let start = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            warn!("cannot read current directory: {err}; using built-in tables");
            return Ok(ReferenceData::default());
        }
    };
    Ok(load_discovered(&start))
}

fn load_discovered(start: &Path) -> ReferenceData {
    let Some(path) = discover(start) else {
        debug!(
            "no {REFERENCE_FILE_NAME} within {MAX_TRAVERSAL_DEPTH} directories; using built-in tables"
        );
        return ReferenceData::default();
    };
    match ReferenceData::from_file(&path) {
        Ok(data) => data,
        Err(err) => {
            warn!("{err}; using built-in tables");
            ReferenceData::default()
        }
    }
}

/// `fitscore validate` entry point.
pub fn run_validate(
    reference_path: Option<&Path>,
    apply_fix: bool,
    output: Option<&Path>,
    json: bool,
) -> Result<bool, Box<dyn Error>> {
    let source = match reference_path {
        Some(p) => Some(p.to_path_buf()),
        None => discover(&std::env::current_dir()?),
    };
    let Some(source) = source else {
        return Err(format!("no {REFERENCE_FILE_NAME} found; pass --reference").into());
    };
    let mut data = ReferenceData::from_file(&source)?;
    let issues = validate(&data);

    let fixed = if apply_fix { fix(&mut data) } else { 0 };
    if apply_fix {
        let target = output.unwrap_or(source.as_path());
        write_atomic(target, data.to_toml_string()?.as_bytes())?;
        debug!(path = %target.display(), fixed, "wrote corrected reference data");
    }

    if json {
        report::print_json(&source, &issues, fixed)?;
    } else {
        report::print_report(&source, &issues, fixed);
    }

    let remaining = if apply_fix { validate(&data) } else { issues };
    Ok(remaining.is_empty())
}

/// `fitscore seed` entry point: the built-in tables as a reference document.
pub fn run_seed() -> Result<(), Box<dyn Error>> {
    let data = ReferenceData {
        standards: builtin_standards(),
        ..Default::default()
    };
    print!("{}", data.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
