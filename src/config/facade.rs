//! Config loading facade: builds the layered configuration and deserializes it.

use super::merge::merge_policy;
use super::sources::{global_file, project_file};
use super::MtcConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`MtcConfig`] from defaults, config files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `project_dir`.
    ///
    /// Precedence, lowest first: defaults, global `config.toml`, `mtc.toml`
    /// in `project_dir`, `MTC_*` environment variables.
    pub fn load(project_dir: &Path) -> Result<MtcConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = project_file::add_to_builder(builder, project_dir);
        let builder = merge_policy::add_environment(builder);

        let config: MtcConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(project_dir = %project_dir.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file on top of the defaults.
    /// The file must exist; the environment still overrides it.
    pub fn load_from_file(path: &Path) -> Result<MtcConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = merge_policy::add_environment(builder);

        let config: MtcConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
