//! Config sources: the global config file and `DROPIN_*` environment variables

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::PathBuf;
use tracing::debug;

/// Path to the global config file: `$XDG_CONFIG_HOME/dropin/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|base| base.config_dir().join("dropin").join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(config_path) = global_config_path() else {
        return Ok(builder);
    };

    if !config_path.exists() {
        debug!(config_path = %config_path.display(), "No global config file");
        return Ok(builder);
    }

    Ok(builder.add_source(
        File::from(config_path)
            .format(FileFormat::Toml)
            .required(false),
    ))
}

/// Add `DROPIN_*` environment overrides; nested keys use `__`
/// (`DROPIN_LOGGING__LEVEL=debug`), lists use `:`
/// (`DROPIN_EXTRA_LOOKUP_PATHS=/opt/a:/opt/b`).
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("DROPIN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(":")
            .with_list_parse_key("extra_lookup_paths"),
    )
}
