//! BLAKE3 Verification Tests
//!
//! Checks that digests produced by the engine are plain BLAKE3 outputs of the
//! documented byte streams.

use blake3::Hasher;
use mtc::tree::hasher::{combine_children, compute_content_hash, hash_reader};
use mtc::{HashResult, HASH_SIZE};

/// BLAKE3 of the empty input.
const EMPTY_DIGEST_HEX: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

#[test]
fn test_empty_result_is_official_empty_digest() {
    let empty = HashResult::empty();
    assert_eq!(empty.digest_hex(), EMPTY_DIGEST_HEX);
    assert_eq!(empty.total_size, 0);
    assert_eq!(combine_children(&[]), empty);
}

#[test]
fn test_content_hash_matches_blake3() {
    for input in [&b""[..], b"a", b"abc", b"Hello, World!", b"test content"] {
        let mut hasher = Hasher::new();
        hasher.update(input);
        assert_eq!(compute_content_hash(input), *hasher.finalize().as_bytes());
    }
}

#[test]
fn test_streaming_equals_one_shot() {
    let content: Vec<u8> = (0..300_000u32).map(|i| (i * 7 % 251) as u8).collect();
    for buffer_size in [1, 63, 4096, 256 * 1024] {
        let mut buffer = vec![0u8; buffer_size];
        let (digest, read) = hash_reader(content.as_slice(), &mut buffer).unwrap();
        assert_eq!(digest, compute_content_hash(&content));
        assert_eq!(read, content.len() as u64);
    }
}

#[test]
fn test_directory_digest_is_hash_of_concatenated_children() {
    let children = [
        HashResult::new(compute_content_hash(b"a"), 1),
        HashResult::new(compute_content_hash(b"bb"), 2),
    ];
    let mut hasher = Hasher::new();
    hasher.update(&children[0].digest);
    hasher.update(&children[1].digest);

    let combined = combine_children(&children);
    assert_eq!(combined.digest, *hasher.finalize().as_bytes());
    assert_eq!(combined.total_size, 3);
    assert_eq!(combined.digest.len(), HASH_SIZE);
}
