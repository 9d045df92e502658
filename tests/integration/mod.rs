//! Integration tests for the mtc checksum engine, comparator and CLI

mod blake3_verification;
mod compare;
mod symlinks;
