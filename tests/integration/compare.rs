//! Integration tests for directory comparison

use super::test_utils::write_tree;
use mtc::ignore::IgnoreSources;
use mtc::{compare_with_exclusions, Comparator, EngineOptions, NO_DIFFERENCES};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_identical_directories() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    write_tree(dir_a.path(), &[("file.txt", "same content")]);
    write_tree(dir_b.path(), &[("file.txt", "same content")]);

    let diffs = compare_with_exclusions(dir_a.path(), dir_b.path(), &[], false, None)
        .await
        .unwrap();
    assert_eq!(diffs, vec![NO_DIFFERENCES.to_string()]);
}

#[tokio::test]
async fn test_same_path_twice() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "a"), ("nested/b.txt", "b")]);

    let diffs = compare_with_exclusions(temp_dir.path(), temp_dir.path(), &[], false, None)
        .await
        .unwrap();
    assert_eq!(diffs, vec![NO_DIFFERENCES.to_string()]);
}

#[tokio::test]
async fn test_different_directories_report_root_mismatch() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    write_tree(dir_a.path(), &[("file.txt", "content a")]);
    write_tree(dir_b.path(), &[("file.txt", "content bb")]);

    let comparison = Comparator::new(IgnoreSources::default(), EngineOptions::default())
        .compare(dir_a.path(), dir_b.path())
        .await
        .unwrap();
    assert!(!comparison.is_identical());

    let diffs = comparison.differences();
    assert_eq!(diffs.len(), 1);
    assert_eq!(
        diffs[0],
        format!(
            "Root mismatch:\nA: {} (size: 9)\nB: {} (size: 10)",
            comparison.a.digest_hex(),
            comparison.b.digest_hex()
        )
    );
}

#[tokio::test]
async fn test_exclusions_apply_to_both_sides() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    write_tree(dir_a.path(), &[("src/lib.rs", "code"), ("node_modules/x.js", "a")]);
    write_tree(dir_b.path(), &[("src/lib.rs", "code"), ("node_modules/y.js", "bbb")]);

    let patterns = vec!["node_modules".to_string()];
    let diffs = compare_with_exclusions(dir_a.path(), dir_b.path(), &patterns, false, None)
        .await
        .unwrap();
    assert_eq!(diffs, vec![NO_DIFFERENCES.to_string()]);

    let diffs = compare_with_exclusions(dir_a.path(), dir_b.path(), &[], false, None)
        .await
        .unwrap();
    assert!(diffs[0].starts_with("Root mismatch:"));
}

#[tokio::test]
async fn test_empty_and_fully_excluded_compare_equal() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    write_tree(dir_b.path(), &[("trace.log", "log line")]);

    let patterns = vec!["*.log".to_string()];
    let diffs = compare_with_exclusions(dir_a.path(), dir_b.path(), &patterns, false, None)
        .await
        .unwrap();
    assert_eq!(diffs, vec![NO_DIFFERENCES.to_string()]);
}

#[tokio::test]
async fn test_custom_ignore_file_shared_by_both_sides() {
    let temp_dir = TempDir::new().unwrap();
    let dir_a = temp_dir.path().join("a");
    let dir_b = temp_dir.path().join("b");
    write_tree(&dir_a, &[("data.txt", "x"), ("scratch.tmp", "1")]);
    write_tree(&dir_b, &[("data.txt", "x")]);
    let ignore_file = temp_dir.path().join("compare.ignore");
    fs::write(&ignore_file, "*.tmp\n").unwrap();

    let diffs = compare_with_exclusions(&dir_a, &dir_b, &[], false, Some(ignore_file.as_path()))
        .await
        .unwrap();
    assert_eq!(diffs, vec![NO_DIFFERENCES.to_string()]);
}
