//! mtc: Deterministic Directory Checksums
//!
//! Computes a single BLAKE3 Merkle root for a file or directory tree so two
//! trees can be compared or verified by one digest. Exclusions follow
//! gitignore-style patterns from the command line and ignore files.

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod tree;
pub mod types;

pub use compare::{compare, compare_with_exclusions, Comparator, Comparison, NO_DIFFERENCES};
pub use error::{ApiError, HashError};
pub use tree::{hash_path, Engine, EngineConfig, EngineOptions};
pub use types::{Hash, HashResult, HASH_SIZE};
