//! Batcher tests: partitioning, scratch-file completeness, per-file isolation.

use chandb::engine::hash_all;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

fn make_corpus(dir: &std::path::Path, n: usize) -> Vec<PathBuf> {
    (0..n)
        .map(|i| {
            let path = dir.join(format!("pkg{i:04}.json"));
            fs::write(&path, format!("{{\"feedstocks\": [\"f{i}\"]}}")).unwrap();
            path
        })
        .collect()
}

fn scratch_lines(scratch: &std::path::Path) -> Vec<String> {
    fs::read_to_string(scratch)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_batch_sizes_2500_files() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let paths = make_corpus(corpus.path(), 2500);

    let scratch = hash_all(&paths, 1000, out.path()).unwrap();
    assert_eq!(scratch.len(), 3);
    assert_eq!(scratch_lines(&scratch[0]).len(), 1000);
    assert_eq!(scratch_lines(&scratch[1]).len(), 1000);
    assert_eq!(scratch_lines(&scratch[2]).len(), 500);
}

#[test]
fn test_batch_union_is_exactly_the_corpus() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let paths = make_corpus(corpus.path(), 257);

    let scratch = hash_all(&paths, 100, out.path()).unwrap();
    let mut seen = Vec::new();
    for file in &scratch {
        for line in scratch_lines(file) {
            let (path, fingerprint) = line.rsplit_once(',').unwrap();
            assert_eq!(fingerprint.len(), 40);
            seen.push(PathBuf::from(path));
        }
    }
    // No file dropped, none duplicated.
    assert_eq!(seen.len(), paths.len());
    let expected: HashSet<_> = paths.iter().cloned().collect();
    let got: HashSet<_> = seen.into_iter().collect();
    assert_eq!(got, expected);
}

#[test]
fn test_batch_empty_corpus() {
    let out = tempfile::tempdir().unwrap();
    let scratch = hash_all(&[], 1000, out.path()).unwrap();
    assert!(scratch.is_empty());
}

#[test]
fn test_batch_zero_batch_size_rejected() {
    let out = tempfile::tempdir().unwrap();
    assert!(hash_all(&[], 0, out.path()).is_err());
}

#[test]
fn test_batch_missing_file_does_not_abort() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut paths = make_corpus(corpus.path(), 5);
    paths.insert(2, corpus.path().join("deleted-mid-scan.json"));

    let scratch = hash_all(&paths, 1000, out.path()).unwrap();
    assert_eq!(scratch.len(), 1);
    // The unreadable file is omitted; the rest of the batch survives.
    assert_eq!(scratch_lines(&scratch[0]).len(), 5);
}
