//! Drop-in directory discovery for a single lookup path
//!
//! For a unit `name` and lookup path `P`, the candidate directory is
//! `P/<name><suffix>`. Instances additionally pick up their template's
//! directory, so `P/getty@.service.d` applies to every `getty@*.service`.

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{CanonicalizeError, DropinError, Result};
use crate::fs::{ConfigFileLister, FsConfigFileLister};
use crate::lookup::UnitPathCache;
use crate::path::canonicalize_under;
use crate::unit;
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolution settings shared by every lookup of one scan
///
/// Borrowed collaborators stay immutable for the lifetime of the resolver, so
/// the unit path cache cannot change in the middle of a pass.
#[derive(Clone, Copy)]
pub struct DropinResolver<'a> {
    pub(crate) original_root: Option<&'a Path>,
    pub(crate) unit_path_cache: Option<&'a dyn UnitPathCache>,
    pub(crate) diagnostics: &'a dyn Diagnostics,
    pub(crate) lister: &'a dyn ConfigFileLister,
}

impl Default for DropinResolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DropinResolver<'a> {
    /// Resolver with no root, no cache, `tracing` diagnostics and the
    /// filesystem lister.
    pub fn new() -> Self {
        Self {
            original_root: None,
            unit_path_cache: None,
            diagnostics: &TracingDiagnostics,
            lister: &FsConfigFileLister,
        }
    }

    /// Confine canonicalization below `root`.
    pub fn with_root(mut self, root: Option<&'a Path>) -> Self {
        self.original_root = root;
        self
    }

    /// Only try candidate directories present in `cache`.
    pub fn with_unit_path_cache(mut self, cache: Option<&'a dyn UnitPathCache>) -> Self {
        self.unit_path_cache = cache;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_lister(mut self, lister: &'a dyn ConfigFileLister) -> Self {
        self.lister = lister;
        self
    }

    /// Append the drop-in directories of `name` under `unit_path` to `dirs`.
    ///
    /// Missing directories are skipped silently and other per-directory
    /// failures are reported through the diagnostics sink; only a failure to
    /// derive the template of an instance name is returned.
    pub fn find_unit_dropin_dirs(
        &self,
        unit_path: &Path,
        name: &str,
        suffix: &str,
        dirs: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let mut name = Cow::Borrowed(name);

        loop {
            let candidate = candidate_path(unit_path, &name, suffix);

            // The cache gates the direct lookup only, never the template fallback.
            let listed = self
                .unit_path_cache
                .map(|cache| cache.contains(&candidate))
                .unwrap_or(true);
            if listed {
                self.find_dir(&candidate, dirs);
            }

            if !unit::is_instance(&name) {
                return Ok(());
            }

            let template = unit::template_of(&name).map_err(|source| {
                self.diagnostics.error(
                    None,
                    &format!("Failed to generate template from unit name {}: {}", name, source),
                );
                DropinError::TemplateDerivation {
                    name: name.to_string(),
                    source,
                }
            })?;
            name = Cow::Owned(template);
        }
    }

    fn find_dir(&self, path: &Path, dirs: &mut Vec<PathBuf>) {
        match canonicalize_under(path, self.original_root) {
            Ok(canonical) => dirs.push(canonical),
            // Most units have no drop-in directory.
            Err(CanonicalizeError::NotFound(_)) => {}
            Err(CanonicalizeError::NameTooLong(_)) => {
                self.diagnostics.debug(
                    Some(path),
                    "Path too long, couldn't canonicalize, ignoring",
                );
            }
            Err(e) => {
                self.diagnostics
                    .warning(Some(path), &format!("Failed to canonicalize path: {}", e));
            }
        }
    }
}

/// `<unit_path>/<name><suffix>`, concatenated so that `name` can never replace
/// `unit_path` the way an absolute `Path::join` argument would.
fn candidate_path(unit_path: &Path, name: &str, suffix: &str) -> PathBuf {
    let mut candidate = OsString::from(unit_path.as_os_str());
    candidate.push("/");
    candidate.push(name);
    candidate.push(suffix);
    PathBuf::from(candidate)
}

/// [`DropinResolver::find_unit_dropin_dirs`] with `tracing` diagnostics.
pub fn find_unit_dropin_dirs(
    original_root: Option<&Path>,
    unit_path_cache: Option<&dyn UnitPathCache>,
    unit_path: &Path,
    name: &str,
    suffix: &str,
    dirs: &mut Vec<PathBuf>,
) -> Result<()> {
    DropinResolver::new()
        .with_root(original_root)
        .with_unit_path_cache(unit_path_cache)
        .find_unit_dropin_dirs(unit_path, name, suffix, dirs)
}
