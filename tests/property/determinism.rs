//! Property-based tests for determinism guarantees

use mtc::tree::hasher;
use mtc::tree::walker::{sort_children, Child, EntryKind};
use mtc::Engine;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn write_files<'a>(root: &Path, files: impl Iterator<Item = (&'a String, &'a Vec<u8>)>) {
    for (name, content) in files {
        fs::write(root.join(name), content).unwrap();
    }
}

/// Test that content hashing is deterministic
#[test]
fn test_content_hash_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<Vec<u8>>(), any::<Vec<u8>>()), |(content1, content2)| {
            let hash1 = hasher::compute_content_hash(&content1);
            let hash2 = hasher::compute_content_hash(&content2);

            assert_eq!(hash1, hasher::compute_content_hash(&content1));
            if content1 != content2 {
                prop_assert_ne!(hash1, hash2);
            }
            Ok(())
        })
        .unwrap();
}

/// Writing the same files in a different order never changes the root.
#[test]
fn test_tree_hash_independent_of_creation_order() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(24));
    let rt = runtime();

    runner
        .run(
            &btree_map("[a-z]{1,8}\\.txt", vec(any::<u8>(), 0..64), 1..12),
            |files: BTreeMap<String, Vec<u8>>| {
                let forward = TempDir::new().unwrap();
                let backward = TempDir::new().unwrap();
                write_files(forward.path(), files.iter());
                write_files(backward.path(), files.iter().rev());

                let engine = Engine::new();
                let (a, b, again) = rt.block_on(async {
                    (
                        engine.hash_path(forward.path()).await.unwrap(),
                        engine.hash_path(backward.path()).await.unwrap(),
                        engine.hash_path(forward.path()).await.unwrap(),
                    )
                });

                let expected_size: u64 = files.values().map(|c| c.len() as u64).sum();
                prop_assert_eq!(a, b);
                prop_assert_eq!(a, again);
                prop_assert_eq!(a.total_size, expected_size);
                Ok(())
            },
        )
        .unwrap();
}

/// Shuffling a raw listing before sorting always yields the same order.
#[test]
fn test_sort_children_ignores_listing_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &vec("[A-Za-z0-9_.-]{1,10}", 1..20).prop_shuffle(),
            |names: Vec<String>| {
                let to_children = |names: &[String]| -> Vec<Child> {
                    names
                        .iter()
                        .map(|name| Child {
                            name: OsString::from(name),
                            path: PathBuf::from(name),
                            kind: EntryKind::File,
                        })
                        .collect()
                };

                let mut shuffled = to_children(&names);
                let mut sorted_input = names.clone();
                sorted_input.sort();
                let mut reference = to_children(&sorted_input);

                sort_children(&mut shuffled);
                sort_children(&mut reference);

                let left: Vec<_> = shuffled.iter().map(|c| c.name.clone()).collect();
                let right: Vec<_> = reference.iter().map(|c| c.name.clone()).collect();
                prop_assert_eq!(left, right);
                Ok(())
            },
        )
        .unwrap();
}

/// Worker count changes scheduling only, never the digest.
#[test]
fn test_worker_count_does_not_change_root() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(12));
    let rt = runtime();

    runner
        .run(
            &(
                btree_map("[a-z]{1,6}", vec(any::<u8>(), 0..32), 1..8),
                1usize..6,
            ),
            |(files, workers)| {
                let temp_dir = TempDir::new().unwrap();
                for (index, (name, content)) in files.iter().enumerate() {
                    let dir = temp_dir.path().join(format!("d{}", index % 3));
                    fs::create_dir_all(&dir).unwrap();
                    fs::write(dir.join(name), content).unwrap();
                }

                let (serial, bounded) = rt.block_on(async {
                    (
                        Engine::with_workers(1).hash_path(temp_dir.path()).await.unwrap(),
                        Engine::with_workers(workers)
                            .hash_path(temp_dir.path())
                            .await
                            .unwrap(),
                    )
                });
                prop_assert_eq!(serial, bounded);
                Ok(())
            },
        )
        .unwrap();
}
