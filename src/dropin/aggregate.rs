//! Drop-in fragment lookup across unit names and lookup paths

use crate::config::DropinConfig;
use crate::dropin::resolve::DropinResolver;
use crate::error::{DropinError, Result};
use crate::lookup::{LookupPaths, ScannedUnitPaths, UnitPathCache};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of a drop-in search
///
/// `found` distinguishes "no drop-in directory exists" from "directories exist
/// but hold no matching fragments".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropInSearch {
    pub found: bool,
    pub files: Vec<PathBuf>,
}

impl DropInSearch {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'a> DropinResolver<'a> {
    /// Collect the fragment files of every name in `names` across
    /// `lookup_paths`.
    ///
    /// Directories are gathered for each name and each lookup path in order;
    /// a failure for one of them is logged and the scan continues. The merged
    /// directory list is then handed to the lister, which deduplicates by file
    /// name and sorts. `file_suffix = None` lists every file, as used for
    /// `.wants/` and `.requires/` directories.
    pub fn find_dropin_paths<I, S, P>(
        &self,
        lookup_paths: &[P],
        dir_suffix: &str,
        file_suffix: Option<&str>,
        names: I,
    ) -> Result<DropInSearch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut dirs = Vec::new();

        for name in names {
            let name = name.as_ref();
            for unit_path in lookup_paths {
                if let Err(e) =
                    self.find_unit_dropin_dirs(unit_path.as_ref(), name, dir_suffix, &mut dirs)
                {
                    debug!(unit = name, error = %e, "Skipping lookup path");
                }
            }
        }

        if dirs.is_empty() {
            return Ok(DropInSearch::default());
        }

        let files = self.lister.list(&dirs, file_suffix).map_err(|e| {
            self.diagnostics.warning(
                None,
                &format!("Failed to create the list of configuration files: {}", e),
            );
            DropinError::Listing(e)
        })?;

        Ok(DropInSearch { found: true, files })
    }
}

/// [`DropinResolver::find_dropin_paths`] with `tracing` diagnostics and the
/// filesystem lister.
pub fn find_dropin_paths<I, S, P>(
    original_root: Option<&Path>,
    lookup_paths: &[P],
    unit_path_cache: Option<&dyn UnitPathCache>,
    dir_suffix: &str,
    file_suffix: Option<&str>,
    names: I,
) -> Result<DropInSearch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: AsRef<Path>,
{
    DropinResolver::new()
        .with_root(original_root)
        .with_unit_path_cache(unit_path_cache)
        .find_dropin_paths(lookup_paths, dir_suffix, file_suffix, names)
}

/// Search the lookup paths described by `config`.
///
/// The root, suffixes and extra lookup paths all come from the configuration.
/// A unit path cache is scanned first when `use_unit_path_cache` is set.
pub fn find_dropin_paths_for_config<I, S>(config: &DropinConfig, names: I) -> Result<DropInSearch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lookup = LookupPaths::from_config(config);
    let cache = ScannedUnitPaths::for_config(config, &lookup);
    debug!(
        scope = ?lookup.scope,
        paths = lookup.paths.len(),
        cached = cache.is_some(),
        "Searching drop-ins"
    );

    DropinResolver::new()
        .with_root(config.root.as_deref())
        .with_unit_path_cache(cache.as_ref().map(|c| c as &dyn UnitPathCache))
        .find_dropin_paths(
            lookup.as_slice(),
            &config.dir_suffix,
            config.file_suffix(),
            names,
        )
}
