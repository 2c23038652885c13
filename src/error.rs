//! Error types for drop-in resolution and generation.

use std::path::PathBuf;
use thiserror::Error;

/// Unit name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitNameError {
    #[error("Invalid unit name: {0:?}")]
    Invalid(String),

    #[error("Unit name is not an instance: {0:?}")]
    NotInstance(String),
}

/// Path canonicalization errors
///
/// `NotFound` and `NameTooLong` are expected outcomes during drop-in discovery
/// and are kept apart from the catch-all `Io` variant.
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Path name too long: {0}")]
    NameTooLong(PathBuf),

    #[error("Too many levels of symbolic links: {0}")]
    TooManyLinks(PathBuf),

    #[error("Failed to canonicalize {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration file listing errors
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Drop-in errors
#[derive(Debug, Error)]
pub enum DropinError {
    #[error("Invalid drop-in name: {0:?}")]
    InvalidName(String),

    #[error("Invalid unit: {0:?}")]
    InvalidUnit(String),

    #[error("Failed to generate template from unit name {name:?}: {source}")]
    TemplateDerivation {
        name: String,
        #[source]
        source: UnitNameError,
    },

    #[error("Failed to create the list of configuration files: {0}")]
    Listing(#[from] ListingError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for DropinError {
    fn from(err: config::ConfigError) -> Self {
        DropinError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DropinError>;
