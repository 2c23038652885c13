//! Drop-in generation

use crate::dropin::paths::build_drop_in_paths;
use crate::error::{DropinError, Result};
use crate::fs::{ensure_dir, write_string_atomic};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Mode of created drop-in directories.
pub const DROPIN_DIR_MODE: u32 = 0o755;

/// Write `data` as the drop-in `(unit, level, name)` below `dir`.
///
/// Creates `<dir>/<unit>.d` if needed. The fragment is replaced atomically, so
/// on failure no partially written file is visible.
pub fn write_drop_in(dir: &Path, unit: &str, level: u32, name: &str, data: &str) -> Result<()> {
    let paths = build_drop_in_paths(dir, unit, level, name)?;

    ensure_dir(&paths.dir, DROPIN_DIR_MODE).map_err(|source| DropinError::Io {
        path: paths.dir.clone(),
        source,
    })?;

    write_string_atomic(&paths.file, data).map_err(|source| DropinError::Io {
        path: paths.file.clone(),
        source,
    })?;

    debug!(path = %paths.file.display(), bytes = data.len(), "Wrote drop-in");
    Ok(())
}

/// Render `args` and write the result as a drop-in.
///
/// Usually called through [`write_drop_in_format!`](crate::write_drop_in_format).
pub fn write_drop_in_fmt(
    dir: &Path,
    unit: &str,
    level: u32,
    name: &str,
    args: fmt::Arguments<'_>,
) -> Result<()> {
    let data = fmt::format(args);
    write_drop_in(dir, unit, level, name, &data)
}

/// Write a drop-in whose content is given as format arguments.
///
/// ```no_run
/// use std::path::Path;
///
/// dropin::write_drop_in_format!(
///     Path::new("/run/systemd/system"),
///     "foo.service",
///     50,
///     "limits",
///     "[Service]\nLimitNOFILE={}\n",
///     4096
/// )?;
/// # Ok::<(), dropin::error::DropinError>(())
/// ```
#[macro_export]
macro_rules! write_drop_in_format {
    ($dir:expr, $unit:expr, $level:expr, $name:expr, $($arg:tt)+) => {
        $crate::dropin::write_drop_in_fmt($dir, $unit, $level, $name, format_args!($($arg)+))
    };
}
