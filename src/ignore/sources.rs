//! Pattern sources: a custom ignore file, command-line patterns, and
//! `.mtcignore` / `.gitignore` files discovered from the working directory up
//! to the filesystem root.

use super::matcher::{Matcher, NoopMatcher, PatternMatcher};
use crate::error::HashError;
use crate::tree::path;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Tool-specific ignore file; wins over `.gitignore` in the same directory.
pub const MTC_IGNORE_FILE: &str = ".mtcignore";

pub const GIT_IGNORE_FILE: &str = ".gitignore";

/// Conventional ignore file names in precedence order.
pub const IGNORE_FILE_NAMES: [&str; 2] = [MTC_IGNORE_FILE, GIT_IGNORE_FILE];

/// Split ignore file contents into raw patterns (trim, skip empty and `#`).
pub fn parse_patterns(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Resolve `file_name` inside `dir`, rejecting anything that is not a single
/// plain path component.
fn resolve_within(dir: &Path, file_name: &OsStr) -> Result<PathBuf, HashError> {
    let mut components = Path::new(file_name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == file_name
    );
    if !plain {
        return Err(HashError::TraversalRejected(format!(
            "invalid ignore file name {:?}",
            file_name
        )));
    }

    let dir = path::normalize(&path::absolute(dir)?);
    let candidate = dir.join(file_name);
    path::ensure_within(&dir, &candidate)?;
    Ok(candidate)
}

/// Load one conventionally-named ignore file from `dir`.
///
/// Returns `Ok(None)` when the file is absent or not a regular file.
pub fn load_ignore_file(dir: &Path, file_name: &str) -> Result<Option<Vec<String>>, HashError> {
    let ignore_path = resolve_within(dir, OsStr::new(file_name))?;

    match fs::metadata(&ignore_path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => {
            debug!(path = %ignore_path.display(), "Ignore path is not a regular file, skipping");
            return Ok(None);
        }
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(HashError::io(&ignore_path, e)),
    }

    let contents = fs::read_to_string(&ignore_path).map_err(|e| HashError::io(&ignore_path, e))?;
    let patterns = parse_patterns(&contents);
    info!(
        file = %ignore_path.display(),
        patterns = patterns.len(),
        "Loaded ignore file"
    );
    Ok(Some(patterns))
}

/// Load a user-specified ignore file. Unlike discovered files, a missing or
/// unreadable file is an error.
pub fn load_custom_ignore_file(file: &Path) -> Result<Vec<String>, HashError> {
    if matches!(
        file.components().last(),
        None | Some(Component::ParentDir) | Some(Component::CurDir) | Some(Component::RootDir)
    ) {
        return Err(HashError::TraversalRejected(format!(
            "invalid ignore file path {:?}",
            file
        )));
    }

    let absolute = path::normalize(&path::absolute(file)?);
    let (parent, name) = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => (parent, name),
        _ => {
            return Err(HashError::TraversalRejected(format!(
                "invalid ignore file path {:?}",
                file
            )))
        }
    };
    let resolved = resolve_within(parent, name)?;

    let contents = fs::read_to_string(&resolved).map_err(|e| {
        let reason = if e.kind() == ErrorKind::NotFound {
            "ignore file does not exist".to_string()
        } else {
            format!("failed to read ignore file: {}", e)
        };
        HashError::InvalidPatternSource {
            path: file.to_path_buf(),
            reason,
        }
    })?;

    let patterns = parse_patterns(&contents);
    info!(
        file = %resolved.display(),
        patterns = patterns.len(),
        "Loaded custom ignore file"
    );
    Ok(patterns)
}

/// Collect patterns from every `.mtcignore` and `.gitignore` between `start`
/// and the filesystem root. Closer directories come first; within one
/// directory `.mtcignore` precedes `.gitignore`.
pub fn discover_ignore_files(start: &Path) -> Result<Vec<String>, HashError> {
    let start = path::normalize(&path::absolute(start)?);
    let mut patterns = Vec::new();

    for dir in start.ancestors() {
        for file_name in IGNORE_FILE_NAMES {
            if let Some(found) = load_ignore_file(dir, file_name)? {
                patterns.extend(found);
            }
        }
    }

    Ok(patterns)
}

/// The set of places exclusion patterns come from.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSources {
    /// Patterns supplied on the command line.
    pub patterns: Vec<String>,
    /// Explicit ignore file; must exist when set.
    pub custom_file: Option<PathBuf>,
    /// Walk up from `working_dir` looking for `.mtcignore` / `.gitignore`.
    pub auto_discover: bool,
    /// Discovery start; defaults to the process working directory.
    pub working_dir: Option<PathBuf>,
}

impl IgnoreSources {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            ..Self::default()
        }
    }

    pub fn with_custom_file(mut self, file: Option<PathBuf>) -> Self {
        self.custom_file = file;
        self
    }

    pub fn with_auto_discover(mut self, auto_discover: bool) -> Self {
        self.auto_discover = auto_discover;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Merge all sources, highest priority first: custom file, command-line
    /// patterns, discovered files.
    pub fn load(&self) -> Result<Vec<String>, HashError> {
        let mut all = Vec::new();

        if let Some(ref custom) = self.custom_file {
            all.extend(load_custom_ignore_file(custom)?);
        }

        all.extend(self.patterns.iter().cloned());

        if self.auto_discover {
            let start = match self.working_dir {
                Some(ref dir) => dir.clone(),
                None => std::env::current_dir()
                    .map_err(|e| HashError::resolution(Path::new("."), e))?,
            };
            let discovered = discover_ignore_files(&start)?;
            if !discovered.is_empty() {
                info!(patterns = discovered.len(), "Loaded automatic ignore files");
            }
            all.extend(discovered);
        }

        Ok(all)
    }

    /// Load every source and compile the result. With no patterns at all the
    /// returned matcher excludes nothing.
    pub fn build_matcher(&self) -> Result<Arc<dyn Matcher>, HashError> {
        let patterns = self.load()?;
        let matcher = PatternMatcher::new(&patterns);
        if matcher.is_empty() {
            return Ok(Arc::new(NoopMatcher));
        }
        debug!(patterns = matcher.patterns().len(), "Compiled exclusion patterns");
        Ok(Arc::new(matcher))
    }
}
