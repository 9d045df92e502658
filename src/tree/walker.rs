//! Directory listing for the hashing engine.
//!
//! Lists the direct children of one directory without following symlinks and
//! orders them by exact byte-wise name comparison so the combined hash never
//! depends on filesystem enumeration order or locale collation.

use std::ffi::OsString;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry is, as seen by link-aware stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    /// Named pipes, sockets and device files.
    Special,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Special
        }
    }
}

/// A direct child of a directory being hashed.
#[derive(Debug, Clone)]
pub struct Child {
    pub name: OsString,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// List the direct children of `dir` in filesystem order.
pub fn list_children(dir: &Path) -> io::Result<Vec<Child>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let kind = EntryKind::from(entry.file_type()?);
        children.push(Child {
            name: entry.file_name(),
            path: entry.path(),
            kind,
        });
    }
    Ok(children)
}

/// Sort children by the raw bytes of their names.
pub fn sort_children(children: &mut [Child]) {
    children.sort_by(|a, b| a.name.as_encoded_bytes().cmp(b.name.as_encoded_bytes()));
}
