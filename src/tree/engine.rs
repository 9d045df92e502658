//! Merkle hashing engine.
//!
//! Every visited path goes through the same steps: canonicalize, cycle-check,
//! link-aware stat, exclusion test, then one of excluded / symlink leaf /
//! directory / file leaf. Sibling subtrees are hashed concurrently, but
//! directory digests always combine child results in sorted name order, so
//! concurrency only changes wall-clock time.

use crate::error::HashError;
use crate::ignore::{IgnoreSources, Matcher, NoopMatcher};
use crate::tree::hasher;
use crate::tree::path;
use crate::tree::pool::{IoPool, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_WORKERS};
use crate::tree::visited::VisitedSet;
use crate::tree::walker::{self, Child, EntryKind};
use crate::types::HashResult;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::sync::OwnedSemaphorePermit;
use tracing::{debug, error, info};

/// Longest symlink chain followed when checking a link for loops.
const MAX_LINK_HOPS: usize = 40;

/// Resource limits for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum concurrent file reads and directory listings. 0 means default.
    pub max_workers: usize,
    /// Streaming read buffer size in bytes. 0 means default.
    pub buffer_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl EngineOptions {
    pub fn with_workers(max_workers: usize) -> Self {
        Self {
            max_workers,
            ..Self::default()
        }
    }
}

/// Everything needed to construct an [`Engine`] with exclusions.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Command-line exclusion patterns.
    pub patterns: Vec<String>,
    /// Root that relative paths and containment checks are computed from.
    /// When unset, each `hash_path` call uses the path being hashed.
    pub root: Option<PathBuf>,
    /// Discover `.mtcignore` / `.gitignore` from the working directory up.
    pub auto_load_ignore_files: bool,
    /// User-specified ignore file; must exist when set.
    pub custom_ignore_file: Option<PathBuf>,
    pub max_workers: usize,
    pub buffer_size: usize,
    /// Start of ignore file discovery; defaults to the process working directory.
    pub working_dir: Option<PathBuf>,
}

impl EngineConfig {
    pub fn ignore_sources(&self) -> IgnoreSources {
        let sources = IgnoreSources::new(self.patterns.clone())
            .with_custom_file(self.custom_ignore_file.clone())
            .with_auto_discover(self.auto_load_ignore_files);
        match self.working_dir {
            Some(ref dir) => sources.with_working_dir(dir),
            None => sources,
        }
    }

    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            max_workers: self.max_workers,
            buffer_size: self.buffer_size,
        }
    }
}

/// Per-call state: the effective root and the in-progress path set.
struct WalkContext {
    root: PathBuf,
    visited: VisitedSet,
}

/// Merkle hashing engine with bounded I/O concurrency and exclusion support.
///
/// The engine is immutable once built; each [`Engine::hash_path`] call gets
/// its own visited set, so calls never share cycle state.
#[derive(Debug)]
pub struct Engine {
    root: Option<PathBuf>,
    matcher: Arc<dyn Matcher>,
    pool: Arc<IoPool>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with default limits and no exclusions.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Engine with a custom worker count; 0 falls back to the default.
    pub fn with_workers(max_workers: usize) -> Self {
        Self::with_options(EngineOptions::with_workers(max_workers))
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            root: None,
            matcher: Arc::new(NoopMatcher),
            pool: Arc::new(IoPool::new(options.max_workers, options.buffer_size)),
        }
    }

    /// Engine using an already compiled matcher, rooted at `root`.
    pub fn with_matcher(
        options: EngineOptions,
        matcher: Arc<dyn Matcher>,
        root: &Path,
    ) -> Result<Self, HashError> {
        let root = path::canonicalize_path(root)?;
        Ok(Self {
            root: Some(root),
            matcher,
            pool: Arc::new(IoPool::new(options.max_workers, options.buffer_size)),
        })
    }

    /// Engine whose exclusions come from command-line patterns, an optional
    /// custom ignore file and (when `auto_load` is set) discovered ignore files.
    pub fn with_exclusions(
        max_workers: usize,
        patterns: &[String],
        root: impl AsRef<Path>,
        auto_load: bool,
        custom_ignore_file: Option<&Path>,
    ) -> Result<Self, HashError> {
        Self::from_config(&EngineConfig {
            patterns: patterns.to_vec(),
            root: Some(root.as_ref().to_path_buf()),
            auto_load_ignore_files: auto_load,
            custom_ignore_file: custom_ignore_file.map(Path::to_path_buf),
            max_workers,
            ..EngineConfig::default()
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, HashError> {
        let matcher = config.ignore_sources().build_matcher()?;
        let root = config
            .root
            .as_deref()
            .map(path::canonicalize_path)
            .transpose()?;
        Ok(Self {
            root,
            matcher,
            pool: Arc::new(IoPool::new(config.max_workers, config.buffer_size)),
        })
    }

    pub fn max_workers(&self) -> usize {
        self.pool.capacity()
    }

    pub fn buffer_size(&self) -> usize {
        self.pool.buffer_size()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Compute the Merkle root hash and total size of a file or directory.
    ///
    /// Symlinks are leaves: their link text is hashed and they are never
    /// traversed. Any I/O failure on a non-excluded path aborts the call.
    pub async fn hash_path(&self, target: impl AsRef<Path>) -> Result<HashResult, HashError> {
        let target = path::canonicalize_path(target.as_ref())?;
        let ctx = WalkContext {
            root: self.root.clone().unwrap_or_else(|| target.clone()),
            visited: VisitedSet::new(),
        };

        let start = Instant::now();
        info!(path = %target.display(), root = %ctx.root.display(), "Starting hash computation");

        match self.hash_entry(&ctx, target.clone()).await {
            Ok(result) => {
                info!(
                    path = %target.display(),
                    hash = %result.digest_hex(),
                    size = result.total_size,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Hash computation completed"
                );
                Ok(result)
            }
            Err(e) => {
                error!(
                    path = %target.display(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Hash computation failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    fn hash_entry<'a>(
        &'a self,
        ctx: &'a WalkContext,
        entry: PathBuf,
    ) -> BoxFuture<'a, Result<HashResult, HashError>> {
        async move {
            let _visit = ctx.visited.enter(&entry)?;

            let metadata = fs::symlink_metadata(&entry)
                .await
                .map_err(|e| HashError::io(&entry, e))?;
            let kind = EntryKind::from(metadata.file_type());

            if self.is_excluded(ctx, &entry, kind.is_dir()) {
                debug!(path = %entry.display(), "Excluding path");
                return Ok(HashResult::empty());
            }

            match kind {
                EntryKind::Symlink => self.hash_symlink(&entry).await,
                EntryKind::Directory => self.hash_dir(ctx, &entry).await,
                EntryKind::File => self.hash_file(ctx, &entry, metadata.len()).await,
                EntryKind::Special => Err(HashError::UnsupportedFileType(entry.clone())),
            }
        }
        .boxed()
    }

    /// Exclusion is tested against the root-relative path, the absolute path
    /// and the bare file name; any match excludes.
    fn is_excluded(&self, ctx: &WalkContext, entry: &Path, is_dir: bool) -> bool {
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative = match path::relative_to(&ctx.root, entry) {
            Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Some(rel) => path::match_string(&rel),
            None => name.clone(),
        };
        let absolute = path::match_string(entry);

        [relative, absolute, name]
            .iter()
            .any(|candidate| self.matcher.matches(candidate, is_dir))
    }

    async fn acquire(&self, entry: &Path) -> Result<OwnedSemaphorePermit, HashError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| HashError::io(entry, io::Error::other(e)))
    }

    async fn hash_symlink(&self, link: &Path) -> Result<HashResult, HashError> {
        let target = fs::read_link(link)
            .await
            .map_err(|e| HashError::io(link, e))?;
        self.check_link_chain(link, &target).await?;

        debug!(
            symlink = %link.display(),
            target = %target.display(),
            "Hashed symlink as leaf node"
        );
        Ok(HashResult::new(hasher::hash_link_target(&target), 0))
    }

    /// Trace the chain of link texts starting at `link` without reading any
    /// content. Fails if the chain loops back on itself.
    async fn check_link_chain(&self, link: &Path, target: &Path) -> Result<(), HashError> {
        let _permit = self.acquire(link).await?;
        let (owned_link, owned_target) = (link.to_path_buf(), target.to_path_buf());
        tokio::task::spawn_blocking(move || trace_link_chain(&owned_link, &owned_target))
            .await
            .map_err(|e| HashError::io(link, io::Error::other(e)))?
    }

    async fn list_dir(&self, dir: &Path) -> Result<Vec<Child>, HashError> {
        let _permit = self.acquire(dir).await?;
        let owned = dir.to_path_buf();
        tokio::task::spawn_blocking(move || walker::list_children(&owned))
            .await
            .map_err(|e| HashError::io(dir, io::Error::other(e)))?
            .map_err(|e| HashError::io(dir, e))
    }

    async fn hash_dir(&self, ctx: &WalkContext, dir: &Path) -> Result<HashResult, HashError> {
        let start = Instant::now();

        let mut children = self.list_dir(dir).await?;
        walker::sort_children(&mut children);
        let entry_count = children.len();

        let included: Vec<Child> = children
            .into_iter()
            .filter(|child| {
                if child.kind == EntryKind::Special {
                    debug!(entry = ?child.name, "Skipping special file");
                    return false;
                }
                if self.is_excluded(ctx, &child.path, child.kind.is_dir()) {
                    debug!(entry = ?child.name, path = %child.path.display(), "Excluding entry");
                    return false;
                }
                true
            })
            .collect();

        if included.is_empty() {
            return Ok(HashResult::empty());
        }

        let processed = included.len();
        let results = try_join_all(
            included
                .into_iter()
                .map(|child| self.hash_entry(ctx, child.path)),
        )
        .await?;
        let combined = hasher::combine_children(&results);

        debug!(
            path = %dir.display(),
            entry_count,
            processed,
            total_size = combined.total_size,
            duration_ms = start.elapsed().as_millis() as u64,
            "Directory hashed successfully"
        );
        Ok(combined)
    }

    async fn hash_file(
        &self,
        ctx: &WalkContext,
        file: &Path,
        expected_size: u64,
    ) -> Result<HashResult, HashError> {
        path::ensure_within(&ctx.root, file)?;

        let start = Instant::now();
        let permit = self.acquire(file).await?;
        let pool = Arc::clone(&self.pool);
        let owned = file.to_path_buf();

        let (digest, bytes_read) = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let reader = File::open(&owned)?;
            let mut buffer = pool.checkout();
            let hashed = hasher::hash_reader(reader, &mut buffer);
            hashed
        })
        .await
        .map_err(|e| HashError::io(file, io::Error::other(e)))?
        .map_err(|e| HashError::io(file, e))?;

        if bytes_read != expected_size {
            return Err(HashError::io(
                file,
                io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "read {} bytes but metadata reported {}",
                        bytes_read, expected_size
                    ),
                ),
            ));
        }

        debug!(
            path = %file.display(),
            size = bytes_read,
            duration_ms = start.elapsed().as_millis() as u64,
            "File hashed successfully"
        );
        Ok(HashResult::new(digest, bytes_read))
    }
}

fn trace_link_chain(link: &Path, target: &Path) -> Result<(), HashError> {
    let mut hops: HashSet<PathBuf> = HashSet::new();
    hops.insert(link.to_path_buf());
    let mut next = target.to_path_buf();
    let mut from = link.to_path_buf();

    for _ in 0..MAX_LINK_HOPS {
        // Unresolvable directory part: the link dangles.
        let Some(current) = path::resolve_link_target(&from, &next) else {
            return Ok(());
        };
        if !hops.insert(current.clone()) {
            error!(path = %link.display(), "Circular symlink detected");
            return Err(HashError::CycleDetected(current));
        }
        match std::fs::symlink_metadata(&current) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                next = std::fs::read_link(&current).map_err(|e| HashError::io(&current, e))?;
                from = current;
            }
            // Dangling, or the chain ends at a real file or directory.
            _ => return Ok(()),
        }
    }

    error!(path = %link.display(), hops = MAX_LINK_HOPS, "Symlink chain too long");
    Err(HashError::CycleDetected(link.to_path_buf()))
}

/// Hash a path with a default engine (no exclusions).
pub async fn hash_path(target: impl AsRef<Path>) -> Result<HashResult, HashError> {
    Engine::new().hash_path(target).await
}
