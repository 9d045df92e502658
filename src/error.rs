//! Error types for the Merkle tree checksum engine and its CLI.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Engine and ignore-loader errors. Every variant aborts the current
/// top-level operation; nothing is retried.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to resolve path {path:?}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Circular symlink detected at {0:?}")]
    CycleDetected(PathBuf),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path outside allowed directory: {0}")]
    TraversalRejected(String),

    #[error("Invalid ignore file {path:?}: {reason}")]
    InvalidPatternSource { path: PathBuf, reason: String },

    #[error("Unsupported file type (pipe, socket or device) at {0:?}")]
    UnsupportedFileType(PathBuf),
}

impl HashError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        HashError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn resolution(path: &Path, source: std::io::Error) -> Self {
        HashError::PathResolution {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Errors surfaced by configuration, logging and the command-line layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("invalid hash format: {0:?} (expected hexadecimal string)")]
    InvalidHash(String),

    #[error(
        "Hash mismatch: computed hash length ({computed_len}) differs from expected hash length ({expected_len})\nComputed: {computed}\nExpected: {expected}"
    )]
    DigestLengthMismatch {
        computed_len: usize,
        expected_len: usize,
        computed: String,
        expected: String,
    },

    #[error("Hash mismatch!\nComputed: {computed}\nExpected: {expected}")]
    VerificationFailed { computed: String, expected: String },

    #[error("Failed to render output: {0}")]
    OutputError(String),

    #[error(transparent)]
    Hash(#[from] HashError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
