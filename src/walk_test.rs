use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;

const ROOT: &str = "";

fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap_or(p)
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

// ── ExcludeFilter ──────────────────────────────────────────────────────

#[test]
fn exclude_filter_empty() {
    let f = ExcludeFilter::new(&[]).unwrap();
    assert!(f.is_empty());
    assert!(!f.excludes_file(Path::new("a.json"), Path::new(ROOT)));
}

#[test]
fn exclude_filter_glob_matches_filename() {
    let f = ExcludeFilter::new(&["*.draft.json".to_string()]).unwrap();
    assert!(!f.is_empty());
    assert!(f.excludes_file(Path::new("clients/ana.draft.json"), Path::new(ROOT)));
    assert!(!f.excludes_file(Path::new("clients/ana.json"), Path::new(ROOT)));
}

#[test]
fn exclude_filter_glob_matches_relative_path() {
    let f = ExcludeFilter::new(&["archive/**".to_string()]).unwrap();
    let root = Path::new("/data/assessments");
    assert!(f.excludes_file(Path::new("/data/assessments/archive/2024/a.json"), root));
    assert!(!f.excludes_file(Path::new("/data/assessments/current/a.json"), root));
}

#[test]
fn exclude_filter_invalid_glob_is_error() {
    assert!(ExcludeFilter::new(&["[invalid".to_string()]).is_err());
}

// ── assessment_files ───────────────────────────────────────────────────

#[test]
fn finds_json_files_sorted() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b").join("two.json"), "{}").unwrap();
    fs::write(dir.path().join("one.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let files = assessment_files(&[dir.path().to_path_buf()], &[]).unwrap();
    assert_eq!(names(&files, dir.path()), vec!["b/two.json", "one.json"]);
}

#[test]
fn excluded_files_are_skipped() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("archive").join("old.json"), "{}").unwrap();
    fs::write(dir.path().join("new.json"), "{}").unwrap();

    let files = assessment_files(&[dir.path().to_path_buf()], &["archive/**".to_string()])
        .unwrap();
    assert_eq!(names(&files, dir.path()), vec!["new.json"]);
}

#[test]
fn git_directory_is_skipped() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git").join("x.json"), "{}").unwrap();
    fs::write(dir.path().join("a.json"), "{}").unwrap();

    let files = assessment_files(&[dir.path().to_path_buf()], &[]).unwrap();
    assert_eq!(names(&files, dir.path()), vec!["a.json"]);
}

#[test]
fn explicit_file_is_taken_as_is() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export.txt");
    fs::write(&path, "{}").unwrap();

    let files = assessment_files(&[path.clone()], &[]).unwrap();
    assert_eq!(files, vec![path]);
}

#[test]
fn overlapping_roots_are_deduplicated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.json");
    fs::write(&path, "{}").unwrap();

    let files = assessment_files(&[dir.path().to_path_buf(), path.clone()], &[]).unwrap();
    assert_eq!(files, vec![path]);
}

#[test]
fn missing_root_yields_nothing() {
    let dir = tempdir().unwrap();
    let files = assessment_files(&[dir.path().join("absent")], &[]).unwrap();
    assert!(files.is_empty());
}
