//! Filesystem Merkle Tree
//!
//! Hashes a file or directory into a single root digest. Files hash their
//! content, symlinks hash their link text and directories hash their sorted
//! children, so the result depends only on names, structure and bytes.

pub mod engine;
pub mod hasher;
pub mod path;
pub mod pool;
pub mod visited;
pub mod walker;

pub use engine::{hash_path, Engine, EngineConfig, EngineOptions};
