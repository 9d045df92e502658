//! Path canonicalization and containment checks.
//!
//! Canonical paths are absolute and lexically normalized. The parent
//! directory is resolved on disk but the final component is left as-is so a
//! symlink given as the hashing target is hashed as a link, not followed.

use crate::error::HashError;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the process working directory without
/// touching the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf, HashError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| HashError::resolution(path, e))?;
    Ok(cwd.join(path))
}

/// Lexically remove `.` and `..` components and redundant separators.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if at_root {
                    if !out.has_root() {
                        out.push("..");
                    }
                } else if matches!(out.components().next_back(), Some(Component::ParentDir)) {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Canonicalize a path for hashing: absolute, normalized, parent resolved,
/// leaf unresolved.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, HashError> {
    let normalized = normalize(&absolute(path)?);

    match (normalized.parent(), normalized.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = dunce::canonicalize(parent).map_err(|e| HashError::resolution(path, e))?;
            Ok(parent.join(name))
        }
        _ => Ok(normalized),
    }
}

/// Path of `path` relative to `root`, if `path` lies beneath it.
pub fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Reject paths that are not lexically contained in `root`.
pub fn ensure_within(root: &Path, path: &Path) -> Result<(), HashError> {
    let contained = relative_to(root, path)
        .map(|rel| !rel.components().any(|c| matches!(c, Component::ParentDir)))
        .unwrap_or(false);
    if contained {
        Ok(())
    } else {
        Err(HashError::TraversalRejected(format!(
            "{} is not within {}",
            path.display(),
            root.display()
        )))
    }
}

/// Where a symlink's text points, resolved the way the filesystem would.
/// Relative targets start from the link's own directory. Every directory
/// component is resolved physically, so `..` applies after following any
/// symlinked directory; the final component is kept as written. Returns
/// `None` when the directory part does not exist, i.e. the link dangles.
pub fn resolve_link_target(link: &Path, target: &Path) -> Option<PathBuf> {
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        link.parent().unwrap_or_else(|| Path::new("/")).join(target)
    };
    match (joined.parent(), joined.file_name()) {
        (Some(parent), Some(name)) => dunce::canonicalize(parent).ok().map(|dir| dir.join(name)),
        // Ends in `..` or is the filesystem root.
        _ => dunce::canonicalize(&joined).ok(),
    }
}

/// Render a path for pattern matching. The matcher normalizes separators.
pub fn match_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
