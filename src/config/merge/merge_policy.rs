//! Merge rules: defaults, override order, conflict handling.

use crate::tree::pool::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_WORKERS};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Prefix of environment overrides, e.g. `MTC_HASH__MAX_WORKERS=4`.
pub const ENV_PREFIX: &str = "MTC";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("hash.max_workers", DEFAULT_MAX_WORKERS as i64)?
        .set_default("hash.buffer_size", DEFAULT_BUFFER_SIZE as i64)?
        .set_default("hash.auto_load_ignore_files", true)?
        .set_default("hash.exclude", Vec::<String>::new())?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}

/// Environment variables override every file source. Nested keys use a
/// double underscore; `hash.exclude` takes a comma-separated list.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("hash.exclude")
            .try_parsing(true),
    )
}
