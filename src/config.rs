//! Configuration System
//!
//! Layered settings for the hashing engine and logging. Every field has a
//! default, so a missing config file is never an error.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::pool::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_WORKERS};
use crate::tree::{EngineConfig, EngineOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::ENV_PREFIX;
pub use sources::project_file::PROJECT_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MtcConfig {
    #[serde(default)]
    pub hash: HashSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hashing engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashSettings {
    /// Concurrent file reads; 0 means the built-in default.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Streaming read buffer size in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Discover `.mtcignore` / `.gitignore` from the working directory.
    #[serde(default = "default_true")]
    pub auto_load_ignore_files: bool,

    /// Extra exclusion patterns applied to every run.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Custom ignore file with the highest pattern priority.
    #[serde(default)]
    pub ignore_file: Option<PathBuf>,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            buffer_size: default_buffer_size(),
            auto_load_ignore_files: true,
            exclude: Vec::new(),
            ignore_file: None,
        }
    }
}

impl HashSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_size == 0 {
            return Err("buffer_size must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_workers: self.max_workers,
            buffer_size: self.buffer_size,
        }
    }

    /// Engine construction inputs; `patterns` are appended after the
    /// configured `exclude` list.
    pub fn engine_config(&self, patterns: &[String]) -> EngineConfig {
        let mut all = self.exclude.clone();
        all.extend(patterns.iter().cloned());
        EngineConfig {
            patterns: all,
            auto_load_ignore_files: self.auto_load_ignore_files,
            custom_ignore_file: self.ignore_file.clone(),
            max_workers: self.max_workers,
            buffer_size: self.buffer_size,
            ..EngineConfig::default()
        }
    }
}

impl MtcConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        self.hash
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("hash: {}", e)))
    }
}
