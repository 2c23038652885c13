//! Configuration System
//!
//! Layered configuration for embedding the resolver: built-in defaults, then the
//! global config file (`$XDG_CONFIG_HOME/dropin/config.toml`), then `DROPIN_*`
//! environment variables.

use crate::error::DropinError;
use crate::logging::LoggingConfig;
use crate::lookup::UnitScope;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge_policy;
mod sources;

pub use sources::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropinConfig {
    /// Alternative root directory all lookups are confined to
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Manager scope selecting the default lookup paths
    #[serde(default)]
    pub scope: UnitScope,

    /// Directories searched before the scope defaults
    #[serde(default)]
    pub extra_lookup_paths: Vec<PathBuf>,

    /// Suffix appended to a unit name to form its drop-in directory
    #[serde(default = "default_dir_suffix")]
    pub dir_suffix: String,

    /// Suffix of fragment files inside drop-in directories
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    /// Build a unit path cache before resolving
    #[serde(default)]
    pub use_unit_path_cache: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_dir_suffix() -> String {
    ".d".to_string()
}

fn default_file_suffix() -> String {
    ".conf".to_string()
}

impl Default for DropinConfig {
    fn default() -> Self {
        Self {
            root: None,
            scope: UnitScope::default(),
            extra_lookup_paths: Vec::new(),
            dir_suffix: default_dir_suffix(),
            file_suffix: default_file_suffix(),
            use_unit_path_cache: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Root(String),
    LookupPath(PathBuf, String),
    Suffix(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Root(msg) => write!(f, "Root: {}", msg),
            ValidationError::LookupPath(path, msg) => {
                write!(f, "Lookup path '{}': {}", path.display(), msg)
            }
            ValidationError::Suffix(msg) => write!(f, "Suffix: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DropinConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(ref root) = self.root {
            if !root.is_absolute() {
                errors.push(ValidationError::Root(format!(
                    "'{}' must be absolute",
                    root.display()
                )));
            }
        }

        for path in &self.extra_lookup_paths {
            if !path.is_absolute() {
                errors.push(ValidationError::LookupPath(
                    path.clone(),
                    "must be absolute".to_string(),
                ));
            }
        }

        if self.dir_suffix.is_empty() {
            errors.push(ValidationError::Suffix(
                "dir_suffix cannot be empty".to_string(),
            ));
        }
        for (key, suffix) in [("dir_suffix", &self.dir_suffix), ("file_suffix", &self.file_suffix)] {
            if suffix.contains('/') {
                errors.push(ValidationError::Suffix(format!(
                    "{} '{}' cannot contain '/'",
                    key, suffix
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// File suffix as passed to the lister; empty means "any file".
    pub fn file_suffix(&self) -> Option<&str> {
        if self.file_suffix.is_empty() {
            None
        } else {
            Some(&self.file_suffix)
        }
    }
}

/// Loads [`DropinConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file, then environment overrides.
    pub fn load() -> Result<DropinConfig, DropinError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_environment(builder);

        let config: DropinConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load a single TOML file, without defaults layering or environment.
    pub fn load_from_file(path: &Path) -> Result<DropinConfig, DropinError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DropinError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: DropinConfig = toml::from_str(&content).map_err(|e| {
            DropinError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::validated(config)
    }

    fn validated(config: DropinConfig) -> Result<DropinConfig, DropinError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            DropinError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
