//! Cycle guard for one top-level hash operation.
//!
//! Holds the canonical paths currently being processed. A path is inserted on
//! entry and removed when its [`VisitGuard`] drops, so the set mirrors the
//! in-progress ancestry rather than every path ever seen.

use crate::error::HashError;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct VisitedSet {
    paths: Mutex<HashSet<PathBuf>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path` if absent. Fails with `CycleDetected` when the path is
    /// already in progress.
    pub fn enter(&self, path: &Path) -> Result<VisitGuard<'_>, HashError> {
        let inserted = self.paths.lock().insert(path.to_path_buf());
        if !inserted {
            return Err(HashError::CycleDetected(path.to_path_buf()));
        }
        Ok(VisitGuard {
            set: self,
            path: path.to_path_buf(),
        })
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.lock().contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Removes its path from the set on drop.
#[derive(Debug)]
pub struct VisitGuard<'a> {
    set: &'a VisitedSet,
    path: PathBuf,
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.set.paths.lock().remove(&self.path);
    }
}
