//! Hash computation for tree nodes using BLAKE3
//!
//! - file leaf: BLAKE3 of the file bytes
//! - symlink leaf: BLAKE3 of the link text, never the target's content
//! - directory: BLAKE3 over the child digests concatenated in sorted name order

use crate::types::{Hash, HashResult};
use blake3::Hasher;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

/// Compute content hash for in-memory bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    *blake3::hash(content).as_bytes()
}

/// Stream a reader through `buffer` into BLAKE3.
///
/// Returns the digest and the number of bytes consumed.
pub fn hash_reader<R: Read>(mut reader: R, buffer: &mut [u8]) -> io::Result<(Hash, u64)> {
    let mut hasher = Hasher::new();
    let mut bytes_read = 0u64;

    loop {
        let n = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
        bytes_read += n as u64;
    }

    Ok((*hasher.finalize().as_bytes(), bytes_read))
}

/// Leaf digest for a symlink: the hash of its stored target text.
pub fn hash_link_target(target: &Path) -> Hash {
    compute_content_hash(target.as_os_str().as_encoded_bytes())
}

/// Combine child results, already in sorted name order, into a directory
/// result. An empty slice yields [`HashResult::empty`].
pub fn combine_children(children: &[HashResult]) -> HashResult {
    let mut hasher = Hasher::new();
    let mut total_size = 0u64;
    for child in children {
        hasher.update(&child.digest);
        total_size += child.total_size;
    }
    HashResult::new(*hasher.finalize().as_bytes(), total_size)
}
