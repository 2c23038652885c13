//! Directory creation and atomic file writes

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Mode for newly created files.
pub const FILE_MODE: u32 = 0o644;

/// Create `path` and any missing parents with `mode`.
///
/// An existing directory is success; an existing non-directory is not.
pub fn ensure_dir(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    match builder.create(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Write `content` to `path` atomically
///
/// The data goes to a hidden temporary file in the same directory, is synced,
/// and is then renamed over `path`. Readers see either the old file or the new
/// one, never a partial write. The temporary file is removed on failure.
pub fn write_string_atomic(path: &Path, content: &str) -> io::Result<()> {
    let mut temp = temp_file_for(path)?;

    set_file_mode(&temp)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    apply_label(temp.path())?;

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn temp_file_for(path: &Path) -> io::Result<NamedTempFile> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut prefix = std::ffi::OsString::from(".#");
    prefix.push(file_name);

    tempfile::Builder::new().prefix(&prefix).tempfile_in(dir)
}

#[cfg(unix)]
fn set_file_mode(temp: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    temp.as_file()
        .set_permissions(fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_temp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}

/// Security labeling hook for freshly written files.
///
/// No labeling backend is linked in, so this only exists to keep the write
/// sequence in one place.
fn apply_label(_path: &Path) -> io::Result<()> {
    Ok(())
}
