//! Exclusion pattern compilation and matching.
//!
//! Patterns follow a gitignore-like syntax:
//! - `node_modules` matches that name at any depth
//! - `build/` matches directories only
//! - `*.log`, `test?.txt` match a single segment with wildcards
//! - `**/build` matches the remaining segments anywhere in the path
//! - `src/**` matches when the leading segments match from the start
//! - `!important.log` un-excludes anything it matches

use super::glob::{glob_match, has_wildcard};
use std::fmt;

/// Decides whether a path is excluded from hashing.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if `path` (relative, absolute or a bare name) should be
    /// excluded. `is_dir` enables directory-only patterns.
    fn matches(&self, path: &str, is_dir: bool) -> bool;
}

/// Matcher used when no patterns are configured. Excludes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMatcher;

impl Matcher for NoopMatcher {
    fn matches(&self, _path: &str, _is_dir: bool) -> bool {
        false
    }
}

const DOUBLE_STAR: &str = "**";

/// One compiled path segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Glob(String),
    /// `**`; spans any number of segments at either end of a pattern and
    /// behaves like `*` in the middle.
    AnyDirs,
}

impl Segment {
    fn parse(segment: &str) -> Self {
        if segment == DOUBLE_STAR {
            Segment::AnyDirs
        } else if has_wildcard(segment) {
            Segment::Glob(segment.to_string())
        } else {
            Segment::Literal(segment.to_string())
        }
    }

    fn matches(&self, candidate: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == candidate,
            Segment::Glob(glob) => glob_match(glob, candidate),
            Segment::AnyDirs => true,
        }
    }
}

/// Compiled form of one exclusion rule.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    negation: bool,
    dir_only: bool,
    segments: Vec<Segment>,
    has_wildcard: bool,
}

impl Pattern {
    /// Compile one raw line. Returns `None` for blank lines, comments and
    /// patterns that are empty once `!` and the trailing `/` are stripped.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let mut body = trimmed;
        let negation = body.starts_with('!');
        if negation {
            body = &body[1..];
        }
        let dir_only = body.ends_with('/');
        if dir_only {
            body = &body[..body.len() - 1];
        }
        if body.is_empty() {
            return None;
        }

        let body = normalize_separators(body);
        let segments = body.split('/').map(Segment::parse).collect();

        Some(Self {
            raw: trimmed.to_string(),
            negation,
            dir_only,
            segments,
            has_wildcard: has_wildcard(&body),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_negation(&self) -> bool {
        self.negation
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Test this pattern against a path already split into segments.
    pub fn matches_segments(&self, path: &[&str], is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }

        if !self.has_wildcard && self.segments.len() == 1 {
            return path.iter().any(|segment| self.segments[0].matches(segment));
        }

        match self.segments.as_slice() {
            [Segment::AnyDirs] => true,
            [Segment::AnyDirs, rest @ ..] => contains_run(path, rest),
            [prefix @ .., Segment::AnyDirs] => starts_with_run(path, prefix),
            segments => contains_run(path, segments),
        }
    }
}

// The pattern must match a contiguous run of path segments at any offset.
fn contains_run(path: &[&str], pattern: &[Segment]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    if path.len() < pattern.len() {
        return false;
    }
    path.windows(pattern.len()).any(|window| run_matches(window, pattern))
}

fn starts_with_run(path: &[&str], pattern: &[Segment]) -> bool {
    path.len() >= pattern.len() && run_matches(&path[..pattern.len()], pattern)
}

fn run_matches(path: &[&str], pattern: &[Segment]) -> bool {
    path.iter()
        .zip(pattern)
        .all(|(candidate, segment)| segment.matches(candidate))
}

fn normalize_separators(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Ordered set of compiled patterns.
///
/// A path is excluded iff some exclusion pattern matches and no negation
/// pattern matches. Pattern order does not change the outcome.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<Pattern>,
}

impl PatternMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .filter_map(|raw| Pattern::parse(raw.as_ref()))
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, path: &str, is_dir: bool) -> bool {
        let path = normalize_separators(path);
        let segments: Vec<&str> = path.split('/').collect();

        let mut excluded = false;
        for pattern in &self.patterns {
            if pattern.matches_segments(&segments, is_dir) {
                if pattern.negation {
                    return false;
                }
                excluded = true;
            }
        }
        excluded
    }
}
