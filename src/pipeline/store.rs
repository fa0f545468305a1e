//! Assessment files on disk: one JSON document per assessment.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::AssessmentError;
use crate::model::Assessment;

pub fn load_assessment(path: &Path) -> Result<Assessment, AssessmentError> {
    let contents = fs::read_to_string(path).map_err(|source| AssessmentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| AssessmentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `bytes` in one step: readers see the old file or the
/// new one, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn save_assessment(path: &Path, assessment: &Assessment) -> Result<(), AssessmentError> {
    let mut bytes = serde_json::to_vec_pretty(assessment)?;
    bytes.push(b'\n');
    write_atomic(path, &bytes).map_err(|source| AssessmentError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
