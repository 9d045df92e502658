//! CLI route: single route table and run context. Dispatches to the engine,
//! the comparator and presentation.

use crate::cli::parse::{Commands, ExclusionArgs, OutputFormat};
use crate::cli::presentation::{
    format_differences, format_hash_json, format_hash_text, format_verified, PathKind,
};
use crate::compare::Comparator;
use crate::config::{ConfigLoader, MtcConfig};
use crate::error::{ApiError, HashError};
use crate::tree::{Engine, EngineConfig};
use crate::types::HASH_SIZE;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Runtime context for CLI execution: loaded configuration and the working
/// directory ignore files are discovered from.
#[derive(Debug, Clone)]
pub struct RunContext {
    config: MtcConfig,
    working_dir: PathBuf,
    color: bool,
}

impl RunContext {
    /// Create run context from the working directory and optional config path.
    pub fn new(working_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&working_dir)?,
        };
        Ok(Self::from_config(config, working_dir))
    }

    pub fn from_config(config: MtcConfig, working_dir: PathBuf) -> Self {
        Self {
            config,
            working_dir,
            color: false,
        }
    }

    /// Colorize text output; only meaningful when stdout is a terminal.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &MtcConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Hash {
                path,
                exclusions,
                format,
            } => self.handle_hash(path, exclusions, *format).await,
            Commands::Diff { a, b, exclusions } => self.handle_diff(a, b, exclusions).await,
            Commands::Calc {
                path,
                expected,
                exclusions,
            } => self.handle_calc(path, expected, exclusions).await,
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(duration_ms, "Command completed"),
            Err(e) => error!(duration_ms, "Command failed: {}", e),
        }
        result
    }

    /// Merge configured settings with command-line flags. Flags win.
    fn engine_config(&self, args: &ExclusionArgs, root: Option<&Path>) -> EngineConfig {
        let settings = &self.config.hash;
        let mut engine_config = settings.engine_config(&args.exclude);
        if args.ignore_file.is_some() {
            engine_config.custom_ignore_file = args.ignore_file.clone();
        }
        if args.no_ignore_files {
            engine_config.auto_load_ignore_files = false;
        }
        if let Some(workers) = args.workers {
            engine_config.max_workers = workers;
        }
        engine_config.root = root.map(Path::to_path_buf);
        engine_config.working_dir = Some(self.working_dir.clone());
        engine_config
    }

    async fn handle_hash(
        &self,
        path: &Path,
        args: &ExclusionArgs,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let kind = path_kind(path).await?;
        let engine = Engine::from_config(&self.engine_config(args, Some(path)))?;
        let result = engine.hash_path(path).await?;

        let display = path.to_string_lossy();
        match format {
            OutputFormat::Text => Ok(format_hash_text(&display, kind, &result, self.color)),
            OutputFormat::Json => format_hash_json(&display, kind, &result),
        }
    }

    async fn handle_diff(&self, a: &Path, b: &Path, args: &ExclusionArgs) -> Result<String, ApiError> {
        let engine_config = self.engine_config(args, None);
        let comparator = Comparator::new(engine_config.ignore_sources(), engine_config.options());
        let comparison = comparator.compare(a, b).await?;
        Ok(format_differences(&comparison.differences(), self.color))
    }

    async fn handle_calc(
        &self,
        path: &Path,
        expected: &str,
        args: &ExclusionArgs,
    ) -> Result<String, ApiError> {
        let expected_bytes =
            hex::decode(expected).map_err(|_| ApiError::InvalidHash(expected.to_string()))?;

        let engine = Engine::from_config(&self.engine_config(args, Some(path)))?;
        let result = engine.hash_path(path).await?;
        let computed = result.digest_hex();

        if expected_bytes.len() != HASH_SIZE {
            return Err(ApiError::DigestLengthMismatch {
                computed_len: HASH_SIZE,
                expected_len: expected_bytes.len(),
                computed,
                expected: expected.to_string(),
            });
        }
        if expected_bytes.as_slice() != result.digest.as_slice() {
            return Err(ApiError::VerificationFailed {
                computed,
                expected: expected.to_string(),
            });
        }

        info!(hash = %computed, "Hash verification successful");
        Ok(format_verified(&computed, self.color))
    }
}

/// Directories print as `d`; files, symlinks and anything else as `f`.
async fn path_kind(path: &Path) -> Result<PathKind, ApiError> {
    let metadata = tokio::fs::symlink_metadata(path)
        .await
        .map_err(|e| HashError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(if metadata.is_dir() {
        PathKind::Directory
    } else {
        PathKind::File
    })
}
