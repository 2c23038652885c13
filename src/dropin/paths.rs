//! Drop-in path construction
//!
//! A fragment named `name` at priority `level` for unit `unit` lives at
//! `<dir>/<unit>.d/<level>-<escaped name>.conf`.

use crate::error::{DropinError, Result};
use crate::path::escape::{filename_is_valid, xescape};
use std::path::{Path, PathBuf};

/// Suffix of a unit's drop-in directory.
pub const DROPIN_DIR_SUFFIX: &str = ".d";

/// Suffix of drop-in fragment files.
pub const DROPIN_FILE_SUFFIX: &str = ".conf";

/// Characters escaped in fragment names before they become file names.
const FRAGMENT_NAME_BAD_CHARS: &str = "/.";

/// The override directory and the fragment file inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropInPaths {
    /// `<dir>/<unit>.d`
    pub dir: PathBuf,
    /// `<dir>/<unit>.d/<level>-<escaped name>.conf`
    pub file: PathBuf,
}

/// Compute the drop-in directory and fragment path for `(unit, level, name)`.
///
/// Pure: nothing is read from or written to the filesystem.
pub fn build_drop_in_paths(dir: &Path, unit: &str, level: u32, name: &str) -> Result<DropInPaths> {
    let dir_name = format!("{}{}", unit, DROPIN_DIR_SUFFIX);
    if unit.is_empty() || !filename_is_valid(&dir_name) {
        return Err(DropinError::InvalidUnit(unit.to_string()));
    }

    let escaped = xescape(name, FRAGMENT_NAME_BAD_CHARS);
    if !filename_is_valid(&escaped) {
        return Err(DropinError::InvalidName(name.to_string()));
    }

    let drop_in_dir = dir.join(dir_name);
    let file = drop_in_dir.join(format!("{}-{}{}", level, escaped, DROPIN_FILE_SUFFIX));

    Ok(DropInPaths {
        dir: drop_in_dir,
        file,
    })
}
