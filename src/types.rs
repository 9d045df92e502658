//! Core value types shared by the engine, comparator and CLI.

use serde::{Deserialize, Serialize};

/// Size in bytes of every digest produced by the engine (BLAKE3 output).
pub const HASH_SIZE: usize = 32;

/// A 32-byte BLAKE3 digest.
pub type Hash = [u8; HASH_SIZE];

/// Result of hashing a file, symlink, directory or excluded path.
///
/// `total_size` is the sum of regular file bytes beneath the path. Symlinks
/// and excluded entries contribute 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResult {
    pub digest: Hash,
    pub total_size: u64,
}

impl HashResult {
    pub fn new(digest: Hash, total_size: u64) -> Self {
        Self { digest, total_size }
    }

    /// The placeholder for excluded paths and empty directories: the hash of
    /// zero bytes with size 0.
    pub fn empty() -> Self {
        Self {
            digest: *blake3::Hasher::new().finalize().as_bytes(),
            total_size: 0,
        }
    }

    /// Lowercase hex rendering of the digest.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}
