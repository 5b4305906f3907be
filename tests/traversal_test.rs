//! Integration tests for backup traversal and checksum behavior

use backuptest::prelude::*;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(path: &Path, content: &[u8]) {
    let mut file = File::create(path).unwrap();
    file.write_all(content).unwrap();
}

/// The documented scenario: one regular file and one empty file
#[test]
fn test_end_to_end_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let a_txt = temp_dir.path().join("a.txt");
    let empty_bin = temp_dir.path().join("empty.bin");
    write_file(&a_txt, b"hello");
    File::create(&empty_bin).unwrap();

    let results = validate_backup(temp_dir.path());
    assert_eq!(results.len(), 2);

    let a = results.iter().find(|r| r.path == a_txt).unwrap();
    assert_eq!(a.status, Status::Ok);
    assert_eq!(a.size_bytes, 5);
    assert_eq!(a.checksum, checksum_bytes(b"hello", ChecksumAlgorithm::Md5));
    assert!(a.error_message.is_empty());

    let empty = results.iter().find(|r| r.path == empty_bin).unwrap();
    assert_eq!(empty.status, Status::Warning);
    assert_eq!(empty.size_bytes, 0);
    assert_eq!(empty.error_message, EMPTY_FILE_MESSAGE);
    assert_eq!(empty.checksum, checksum_bytes(b"", ChecksumAlgorithm::Md5));

    let summary = Summary::from_results(&results);
    assert_eq!(summary, Summary { ok: 1, warnings: 1, errors: 0 });
    assert!(!summary.is_clean());
}

/// Every file is visited exactly once regardless of nesting depth
#[test]
fn test_deep_tree_visits_each_file_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut expected: HashSet<PathBuf> = HashSet::new();

    let mut dir = temp_dir.path().to_path_buf();
    for depth in 0..6 {
        dir = dir.join(format!("level{}", depth));
        fs::create_dir(&dir).unwrap();
        for i in 0..3 {
            let file = dir.join(format!("file{}.dat", i));
            write_file(&file, format!("{}-{}", depth, i).as_bytes());
            expected.insert(file);
        }
    }
    let top = temp_dir.path().join("top.dat");
    write_file(&top, b"top");
    expected.insert(top);

    let results = validate_backup(temp_dir.path());
    assert_eq!(results.len(), expected.len());

    let visited: HashSet<PathBuf> = results.iter().map(|r| r.path.clone()).collect();
    assert_eq!(visited, expected);
    assert!(results.iter().all(|r| r.status == Status::Ok));
}

/// Re-validating an unchanged file yields the same checksum; one changed byte does not
#[test]
fn test_checksum_determinism_and_single_byte_change() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("archive.tar");
    let mut content = vec![0x42u8; 200_000];
    write_file(&path, &content);

    let first = validate_file(&path);
    let second = validate_file(&path);
    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first.size_bytes, content.len() as u64);

    content[123_456] ^= 0x01;
    write_file(&path, &content);

    let mutated = validate_file(&path);
    assert_eq!(mutated.size_bytes, first.size_bytes);
    assert_ne!(mutated.checksum, first.checksum);
}

/// The observer sees every result exactly once, in traversal order
#[test]
fn test_observer_called_per_result() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["a", "b", "c", "d"] {
        write_file(&temp_dir.path().join(name), name.as_bytes());
    }

    let mut seen = Vec::new();
    let validator = BackupValidator::new(ChecksumAlgorithm::Sha256);
    let results = validator.validate_with(temp_dir.path(), |r| seen.push(r.path.clone()));

    let returned: Vec<PathBuf> = results.iter().map(|r| r.path.clone()).collect();
    assert_eq!(seen, returned);
    assert_eq!(seen.len(), 4);
    assert!(!validator.is_cancelled());
    assert!(results.iter().all(|r| r.checksum.len() == 64));
}

/// A single-file root returns only that file's result
#[test]
fn test_single_file_root_matches_direct_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("database.sql");
    write_file(&path, b"CREATE TABLE t (id INT);");

    let results = validate_backup(&path);
    assert_eq!(results.len(), 1);

    let direct = validate_file(&path);
    assert_eq!(results[0].path, direct.path);
    assert_eq!(results[0].checksum, direct.checksum);
    assert_eq!(results[0].size_bytes, direct.size_bytes);
}

/// The JSON rendering carries the same counts as the summary
#[test]
fn test_json_output_for_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("a.txt"), b"hello");
    File::create(temp_dir.path().join("empty.bin")).unwrap();

    let results = validate_backup(temp_dir.path());
    let mut buffer = Vec::new();
    write_json(&mut buffer, temp_dir.path(), ChecksumAlgorithm::Md5, &results).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["summary"]["ok"], 1);
    assert_eq!(value["summary"]["warnings"], 1);
    assert_eq!(value["results"].as_array().unwrap().len(), 2);
}
