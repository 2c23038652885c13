//! Merge rules: defaults applied beneath every other source.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("scope", "system")?
        .set_default("dir_suffix", ".d")?
        .set_default("file_suffix", ".conf")?
        .set_default("use_unit_path_cache", false)
}
