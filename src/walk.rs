//! Discovery of assessment files under one or more roots.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Extension of an assessment document.
pub const ASSESSMENT_EXT: &str = "json";

/// Glob-based exclusion, matched against the path relative to the walk root
/// and against the bare file name.
pub struct ExcludeFilter {
    globs: GlobSet,
}

impl ExcludeFilter {
    pub fn new(patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            globs: builder.build()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn excludes_file(&self, path: &Path, root: &Path) -> bool {
        if self.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.globs.is_match(relative)
            || path
                .file_name()
                .is_some_and(|name| self.globs.is_match(Path::new(name)))
    }
}

fn is_assessment_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ASSESSMENT_EXT))
}

/// Build a directory walker that respects `.gitignore` and skips `.git`.
pub fn walk(path: &Path) -> ignore::Walk {
    WalkBuilder::new(path)
        .hidden(false)
        .follow_links(false)
        .filter_entry(|entry| {
            !(entry.file_type().is_some_and(|ft| ft.is_dir()) && entry.file_name() == ".git")
        })
        .build()
}

/// Every `.json` file under `paths`, sorted and deduplicated. A path that
/// names a file is taken as-is, whatever its extension.
pub fn assessment_files(
    paths: &[PathBuf],
    exclude: &[String],
) -> Result<Vec<PathBuf>, globset::Error> {
    let filter = ExcludeFilter::new(exclude)?;
    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        for entry in walk(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("{err}");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_some_and(|ft| ft.is_file())
                && is_assessment_file(path)
                && !filter.excludes_file(path, root)
            {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
