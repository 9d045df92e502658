//! Property-based tests for hashing and matching guarantees

mod determinism;
mod exclusion;
