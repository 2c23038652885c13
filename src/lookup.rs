//! Unit search paths and the unit path cache
//!
//! Lookup paths are ordered highest priority first: administrator overrides in
//! `/etc`, runtime units in `/run`, then vendor units under `/usr`. The unit
//! path cache is an optional pre-filter built once per scan from the entries
//! that actually exist one level below each lookup path.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const SYSTEM_UNIT_PATHS: &[&str] = &[
    "/etc/systemd/system",
    "/run/systemd/system",
    "/usr/local/lib/systemd/system",
    "/usr/lib/systemd/system",
];

const USER_UNIT_PATHS: &[&str] = &[
    "/etc/systemd/user",
    "/run/systemd/user",
    "/usr/local/lib/systemd/user",
    "/usr/lib/systemd/user",
];

/// Which manager the lookup paths belong to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitScope {
    #[default]
    System,
    User,
}

/// Ordered unit search directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPaths {
    pub scope: UnitScope,
    pub paths: Vec<PathBuf>,
}

impl LookupPaths {
    pub fn new(scope: UnitScope, paths: Vec<PathBuf>) -> Self {
        Self { scope, paths }
    }

    /// Default search paths of the system manager.
    pub fn system() -> Self {
        Self::new(
            UnitScope::System,
            SYSTEM_UNIT_PATHS.iter().map(PathBuf::from).collect(),
        )
    }

    /// Default search paths of a user manager.
    ///
    /// The per-user configuration directory comes first when the home
    /// directory can be determined.
    pub fn user() -> Self {
        let mut paths = Vec::with_capacity(USER_UNIT_PATHS.len() + 1);
        match directories::BaseDirs::new() {
            Some(base) => paths.push(base.config_dir().join("systemd").join("user")),
            None => debug!("No home directory, skipping per-user unit path"),
        }
        paths.extend(USER_UNIT_PATHS.iter().map(PathBuf::from));
        Self::new(UnitScope::User, paths)
    }

    pub fn for_scope(scope: UnitScope) -> Self {
        match scope {
            UnitScope::System => Self::system(),
            UnitScope::User => Self::user(),
        }
    }

    /// Lookup paths described by a configuration: extra paths first, then the
    /// scope defaults, all placed below `root` when one is configured.
    pub fn from_config(config: &crate::config::DropinConfig) -> Self {
        let defaults = Self::for_scope(config.scope);
        let mut paths = config.extra_lookup_paths.clone();
        paths.extend(defaults.paths);

        let lookup = Self::new(config.scope, paths);
        match config.root {
            Some(ref root) => lookup.prefixed(root),
            None => lookup,
        }
    }

    /// Place every path below `root`.
    pub fn prefixed(self, root: &Path) -> Self {
        let paths = self
            .paths
            .into_iter()
            .map(|p| match p.strip_prefix("/") {
                Ok(relative) => root.join(relative),
                Err(_) => root.join(p),
            })
            .collect();
        Self::new(self.scope, paths)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }
}

/// Set of paths known to exist below the lookup paths
///
/// Only membership is ever queried, so any set-like structure can serve.
pub trait UnitPathCache {
    fn contains(&self, path: &Path) -> bool;
}

impl UnitPathCache for HashSet<PathBuf> {
    fn contains(&self, path: &Path) -> bool {
        HashSet::contains(self, path)
    }
}

impl UnitPathCache for BTreeSet<PathBuf> {
    fn contains(&self, path: &Path) -> bool {
        BTreeSet::contains(self, path)
    }
}

/// Unit path cache built by listing each lookup path one level deep
#[derive(Debug, Clone, Default)]
pub struct ScannedUnitPaths {
    paths: HashSet<PathBuf>,
}

impl ScannedUnitPaths {
    /// Scan `lookup_paths`. Missing directories are skipped, unreadable ones
    /// are logged and skipped.
    pub fn scan<P: AsRef<Path>>(lookup_paths: &[P]) -> Self {
        let mut paths = HashSet::new();

        for lookup_path in lookup_paths {
            let lookup_path = lookup_path.as_ref();
            if !lookup_path.is_dir() {
                continue;
            }
            paths.insert(lookup_path.to_path_buf());

            for entry in WalkDir::new(lookup_path).min_depth(1).max_depth(1) {
                match entry {
                    Ok(entry) => {
                        paths.insert(entry.into_path());
                    }
                    Err(e) => {
                        warn!(
                            path = %lookup_path.display(),
                            error = %e,
                            "Failed to read unit directory entry"
                        );
                    }
                }
            }
        }

        debug!(entries = paths.len(), "Unit path cache built");
        Self { paths }
    }

    /// Scan `lookup` when the configuration asks for a unit path cache.
    pub fn for_config(config: &crate::config::DropinConfig, lookup: &LookupPaths) -> Option<Self> {
        if config.use_unit_path_cache {
            Some(Self::scan(lookup.as_slice()))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl UnitPathCache for ScannedUnitPaths {
    fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}
