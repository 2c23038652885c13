//! Configuration file listing across layered directories
//!
//! Each directory is read one level deep. When the same file name appears in
//! several directories, the copy from the earliest directory wins, so callers
//! pass directories highest priority first. The merged list is sorted by file
//! name, which is what gives `10-foo.conf` precedence over `50-bar.conf`.

use crate::error::ListingError;
use std::collections::btree_map::Entry as MapEntry;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Suffixes left behind by editors and package managers.
const BACKUP_SUFFIXES: &[&str] = &[
    "~",
    ".rpmnew",
    ".rpmsave",
    ".rpmorig",
    ".dpkg-old",
    ".dpkg-new",
    ".dpkg-tmp",
    ".dpkg-dist",
    ".dpkg-bak",
    ".dpkg-backup",
    ".dpkg-remove",
    ".ucf-new",
    ".ucf-old",
    ".ucf-dist",
    ".swp",
    ".bak",
    ".old",
    ".new",
];

/// Produces the merged fragment list for a set of drop-in directories
pub trait ConfigFileLister {
    fn list(&self, dirs: &[PathBuf], suffix: Option<&str>) -> Result<Vec<PathBuf>, ListingError>;
}

/// Lists the real filesystem through [`list_conf_files`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigFileLister;

impl ConfigFileLister for FsConfigFileLister {
    fn list(&self, dirs: &[PathBuf], suffix: Option<&str>) -> Result<Vec<PathBuf>, ListingError> {
        list_conf_files(dirs, suffix)
    }
}

/// List files in `dirs` ending in `suffix` (any regular file when `None`).
///
/// Missing directories are skipped. Returns paths sorted by file name with
/// duplicates by file name removed.
pub fn list_conf_files<P: AsRef<Path>>(
    dirs: &[P],
    suffix: Option<&str>,
) -> Result<Vec<PathBuf>, ListingError> {
    let mut by_name: BTreeMap<OsString, PathBuf> = BTreeMap::new();

    for dir in dirs {
        let dir = dir.as_ref();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_not_found(&e) => {
                    debug!(dir = %dir.display(), "Directory does not exist, skipping");
                    break;
                }
                Err(e) => {
                    return Err(ListingError::ReadDir {
                        path: dir.to_path_buf(),
                        source: e.into(),
                    })
                }
            };

            if !is_candidate(&entry, suffix) {
                continue;
            }

            match by_name.entry(entry.file_name().to_os_string()) {
                MapEntry::Vacant(slot) => {
                    slot.insert(entry.into_path());
                }
                MapEntry::Occupied(existing) => {
                    debug!(
                        path = %entry.path().display(),
                        winner = %existing.get().display(),
                        "Skipping overridden file"
                    );
                }
            }
        }
    }

    Ok(by_name.into_values().collect())
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

fn is_candidate(entry: &DirEntry, suffix: Option<&str>) -> bool {
    let file_type = entry.file_type();
    if !file_type.is_file() && !file_type.is_symlink() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if is_ignored_name(&name) {
        return false;
    }

    match suffix {
        Some(suffix) => name.ends_with(suffix) && name.len() > suffix.len(),
        None => true,
    }
}

/// Hidden files and editor/package-manager leftovers are never configuration.
fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || BACKUP_SUFFIXES.iter().any(|s| name.ends_with(s))
}
