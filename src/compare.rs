//! Directory comparison.
//!
//! Hashes two paths under the same exclusion rules and reports whether their
//! root digests match. No per-file diff is produced.

use crate::error::HashError;
use crate::ignore::IgnoreSources;
use crate::tree::{Engine, EngineOptions};
use crate::types::HashResult;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Sole message reported when both roots are identical.
pub const NO_DIFFERENCES: &str = "No differences detected";

/// Root results for both sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub a: HashResult,
    pub b: HashResult,
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        self.a.digest == self.b.digest
    }

    /// Human-readable differences: the sentinel when identical, otherwise one
    /// root mismatch message.
    pub fn differences(&self) -> Vec<String> {
        if self.is_identical() {
            return vec![NO_DIFFERENCES.to_string()];
        }
        vec![format!(
            "Root mismatch:\nA: {} (size: {})\nB: {} (size: {})",
            self.a.digest_hex(),
            self.a.total_size,
            self.b.digest_hex(),
            self.b.total_size
        )]
    }
}

/// Compares two trees with one set of exclusion sources.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    sources: IgnoreSources,
    options: EngineOptions,
}

impl Comparator {
    pub fn new(sources: IgnoreSources, options: EngineOptions) -> Self {
        Self { sources, options }
    }

    /// Hash `a` and `b` concurrently, each rooted at itself, and return both
    /// results. Exclusions are loaded once and shared by both sides.
    pub async fn compare(
        &self,
        a: impl AsRef<Path>,
        b: impl AsRef<Path>,
    ) -> Result<Comparison, HashError> {
        let (a, b) = (a.as_ref(), b.as_ref());
        let start = Instant::now();
        info!(path_a = %a.display(), path_b = %b.display(), "Starting comparison");

        let matcher = self.sources.build_matcher()?;
        let engine_a = Engine::with_matcher(self.options, Arc::clone(&matcher), a)?;
        let engine_b = Engine::with_matcher(self.options, matcher, b)?;

        let (result_a, result_b) = tokio::try_join!(engine_a.hash_path(a), engine_b.hash_path(b))?;
        let comparison = Comparison {
            a: result_a,
            b: result_b,
        };

        if comparison.is_identical() {
            info!(
                duration_ms = start.elapsed().as_millis() as u64,
                "Paths are identical"
            );
        } else {
            warn!(
                hash_a = %result_a.digest_hex(),
                hash_b = %result_b.digest_hex(),
                size_a = result_a.total_size,
                size_b = result_b.total_size,
                "Paths differ"
            );
        }
        Ok(comparison)
    }
}

/// Compare two paths, loading `.mtcignore` / `.gitignore` from the working
/// directory.
pub async fn compare(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Result<Vec<String>, HashError> {
    compare_with_exclusions(a, b, &[], true, None).await
}

/// Compare two paths with explicit exclusion settings applied to both sides.
pub async fn compare_with_exclusions(
    a: impl AsRef<Path>,
    b: impl AsRef<Path>,
    patterns: &[String],
    auto_load: bool,
    custom_ignore_file: Option<&Path>,
) -> Result<Vec<String>, HashError> {
    let sources = IgnoreSources::new(patterns.to_vec())
        .with_custom_file(custom_ignore_file.map(Path::to_path_buf))
        .with_auto_discover(auto_load);
    let comparison = Comparator::new(sources, EngineOptions::default())
        .compare(a, b)
        .await?;
    Ok(comparison.differences())
}
