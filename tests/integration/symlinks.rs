//! Integration tests for symlink handling: leaves, never followed

#![cfg(unix)]

use super::test_utils::{dir_of, leaf};
use mtc::tree::hasher::compute_content_hash;
use mtc::{hash_path, HashError, HashResult};
use std::fs;
use std::os::unix::fs::symlink;
use tempfile::TempDir;

#[tokio::test]
async fn test_symlink_hashes_link_text() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("target.txt"), "original").unwrap();
    let link = temp_dir.path().join("link");
    symlink("target.txt", &link).unwrap();

    let result = hash_path(&link).await.unwrap();
    assert_eq!(result, HashResult::new(compute_content_hash(b"target.txt"), 0));
}

#[tokio::test]
async fn test_target_content_does_not_affect_link() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.txt");
    let link = temp_dir.path().join("link");
    fs::write(&target, "original").unwrap();
    symlink(&target, &link).unwrap();

    let before = hash_path(&link).await.unwrap();
    fs::write(&target, "changed content that is longer").unwrap();
    let after = hash_path(&link).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_link_text_change_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    let link = temp_dir.path().join("link");
    symlink("one", &link).unwrap();
    let before = hash_path(&link).await.unwrap();

    fs::remove_file(&link).unwrap();
    symlink("two", &link).unwrap();
    let after = hash_path(&link).await.unwrap();

    assert_ne!(before.digest, after.digest);
}

#[tokio::test]
async fn test_symlinked_directory_is_not_traversed() {
    let temp_dir = TempDir::new().unwrap();
    let real = temp_dir.path().join("real");
    fs::create_dir(&real).unwrap();
    fs::write(real.join("file.txt"), "content").unwrap();
    symlink("real", temp_dir.path().join("alias")).unwrap();

    let result = hash_path(temp_dir.path()).await.unwrap();
    let alias_leaf = HashResult::new(compute_content_hash(b"real"), 0);
    assert_eq!(result, dir_of(&[alias_leaf, dir_of(&[leaf(b"content")])]));
    assert_eq!(result.total_size, 7);
}

#[tokio::test]
async fn test_link_to_ancestor_terminates() {
    let temp_dir = TempDir::new().unwrap();
    let sub = temp_dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    symlink("..", sub.join("up")).unwrap();

    let result = hash_path(temp_dir.path()).await.unwrap();
    let up_leaf = HashResult::new(compute_content_hash(b".."), 0);
    assert_eq!(result, dir_of(&[dir_of(&[up_leaf])]));
}

#[tokio::test]
async fn test_dangling_link_is_a_leaf() {
    let temp_dir = TempDir::new().unwrap();
    let link = temp_dir.path().join("dangling");
    symlink("does/not/exist", &link).unwrap();

    let result = hash_path(temp_dir.path()).await.unwrap();
    assert_eq!(result.total_size, 0);
    assert_eq!(
        result,
        dir_of(&[HashResult::new(compute_content_hash(b"does/not/exist"), 0)])
    );
}

#[tokio::test]
async fn test_self_referential_link_is_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let link = temp_dir.path().join("self");
    symlink("self", &link).unwrap();

    let err = hash_path(&link).await.unwrap_err();
    assert!(matches!(err, HashError::CycleDetected(_)));
}

#[tokio::test]
async fn test_two_node_cycle_inside_tree_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("loop");
    fs::create_dir(&dir).unwrap();
    symlink("b", dir.join("a")).unwrap();
    symlink("a", dir.join("b")).unwrap();
    fs::write(temp_dir.path().join("file.txt"), "content").unwrap();

    let err = hash_path(temp_dir.path()).await.unwrap_err();
    assert!(matches!(err, HashError::CycleDetected(_)));
}
