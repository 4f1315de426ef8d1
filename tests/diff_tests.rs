//! Delta computer tests: scratch-file parsing and set difference against the
//! store snapshot.

use chandb::Snapshot;
use chandb::engine::{diff_against_snapshot, path_relative_to};
use std::fs;
use std::path::{Path, PathBuf};

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/corpus");
    let path = PathBuf::from("/corpus/numpy/outputs.json");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("numpy/outputs.json"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/corpus");
    let path = PathBuf::from("/elsewhere/outputs.json");
    assert_eq!(path_relative_to(&path, &base), None);
}

// --- diff_against_snapshot ---

fn write_scratch(dir: &Path, name: &str, lines: &[(&str, &str)]) -> PathBuf {
    let file = dir.join(name);
    let content: String = lines
        .iter()
        .map(|(path, hash)| format!("{path},{hash}\n"))
        .collect();
    fs::write(&file, content).unwrap();
    file
}

#[test]
fn test_diff_new_changed_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let root = Path::new("/corpus");
    let scratch = write_scratch(
        dir.path(),
        "batch_0.txt",
        &[
            ("/corpus/same.json", "aaaa"),
            ("/corpus/stale.json", "cccc"),
            ("/corpus/new.json", "dddd"),
        ],
    );

    let mut snapshot = Snapshot::new();
    snapshot.insert((PathBuf::from("same.json"), "aaaa".to_string()));
    snapshot.insert((PathBuf::from("stale.json"), "bbbb".to_string()));

    let changed = diff_against_snapshot(&snapshot, &[scratch], root).unwrap();
    assert_eq!(
        changed,
        vec![
            (PathBuf::from("new.json"), "dddd".to_string()),
            (PathBuf::from("stale.json"), "cccc".to_string()),
        ]
    );
}

#[test]
fn test_diff_empty_snapshot_everything_changed() {
    let dir = tempfile::tempdir().unwrap();
    let root = Path::new("/corpus");
    let scratch = write_scratch(
        dir.path(),
        "batch_0.txt",
        &[("/corpus/a.json", "1111"), ("/corpus/b.json", "2222")],
    );

    let changed = diff_against_snapshot(&Snapshot::new(), &[scratch], root).unwrap();
    assert_eq!(changed.len(), 2);
}

#[test]
fn test_diff_identical_snapshot_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let root = Path::new("/corpus");
    let scratch = write_scratch(dir.path(), "batch_0.txt", &[("/corpus/a.json", "1111")]);

    let mut snapshot = Snapshot::new();
    snapshot.insert((PathBuf::from("a.json"), "1111".to_string()));

    let changed = diff_against_snapshot(&snapshot, &[scratch], root).unwrap();
    assert!(changed.is_empty());
}

#[test]
fn test_diff_reads_multiple_scratch_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = Path::new("/corpus");
    let s0 = write_scratch(dir.path(), "batch_0.txt", &[("/corpus/a.json", "1111")]);
    let s1 = write_scratch(dir.path(), "batch_1.txt", &[("/corpus/b.json", "2222")]);

    let changed = diff_against_snapshot(&Snapshot::new(), &[s0, s1], root).unwrap();
    assert_eq!(changed.len(), 2);
}

#[test]
fn test_diff_missing_scratch_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("batch_9.txt");
    let result = diff_against_snapshot(&Snapshot::new(), &[missing], Path::new("/corpus"));
    assert!(result.is_err());
}
