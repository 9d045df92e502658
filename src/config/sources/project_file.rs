//! Project config file source: `mtc.toml` in the working directory.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_CONFIG_FILE: &str = "mtc.toml";

pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_CONFIG_FILE)
}

/// Add the project config file to builder. Overrides the global file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_dir: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = project_config_path(project_dir);
    if path.is_file() {
        debug!(config_path = %path.display(), "Loading project configuration");
        builder.add_source(File::from(path.as_path()).required(false))
    } else {
        builder
    }
}
