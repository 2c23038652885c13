//! Symlink-following path canonicalization, optionally confined to a root
//!
//! Without a root this is plain canonicalization through `dunce`. With a root
//! the path is resolved one component at a time below that root: absolute
//! symlink targets are re-anchored at the root and `..` never climbs above it,
//! so an image mounted at `/mnt/image` resolves exactly as it would when booted.

use crate::error::CanonicalizeError;
use crate::path::escape::NAME_MAX;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Longest path accepted, in bytes (excluding the terminating NUL).
pub const PATH_MAX: usize = 4095;

/// Maximum number of symlinks followed while resolving one path.
pub const MAX_SYMLINK_HOPS: usize = 32;

enum Step {
    Parent,
    Name(OsString),
}

/// Canonicalize `path`, resolving it below `root` when one is given.
///
/// A path that already starts with `root` is taken as is; any other path is
/// interpreted relative to `root`. The root is used literally as the prefix of
/// the result, even when it is reached through a symlink. The result never
/// points outside `root`.
pub fn canonicalize_under(path: &Path, root: Option<&Path>) -> Result<PathBuf, CanonicalizeError> {
    check_length(path)?;

    let root = match root {
        Some(r) if r != Path::new("/") && !r.as_os_str().is_empty() => r.to_path_buf(),
        _ => {
            return dunce::canonicalize(path).map_err(|e| classify_io_error(path, e));
        }
    };

    let relative = strip_root(path, &root);

    let mut todo: VecDeque<Step> = steps(relative).collect();
    let mut done = root.clone();
    let mut hops = 0;

    while let Some(step) = todo.pop_front() {
        let name = match step {
            Step::Parent => {
                if done != root {
                    done.pop();
                }
                continue;
            }
            Step::Name(name) => name,
        };

        let next = done.join(&name);
        let metadata = fs::symlink_metadata(&next).map_err(|e| classify_io_error(path, e))?;

        if metadata.file_type().is_symlink() {
            hops += 1;
            if hops > MAX_SYMLINK_HOPS {
                return Err(CanonicalizeError::TooManyLinks(path.to_path_buf()));
            }

            let target = fs::read_link(&next).map_err(|e| classify_io_error(path, e))?;
            if target.has_root() {
                done = root.clone();
            }
            let mut target_steps: Vec<Step> = steps(&target).collect();
            while let Some(s) = target_steps.pop() {
                todo.push_front(s);
            }
            continue;
        }

        if !todo.is_empty() && !metadata.is_dir() {
            return Err(CanonicalizeError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::Other,
                    format!("{} is not a directory", next.display()),
                ),
            });
        }

        done = next;
    }

    Ok(done)
}

/// `path` below `root`, matched against the root as given first and against
/// its canonical form second.
fn strip_root<'p>(path: &'p Path, root: &Path) -> &'p Path {
    if let Ok(relative) = path.strip_prefix(root) {
        return relative;
    }
    dunce::canonicalize(root)
        .ok()
        .and_then(|canonical| path.strip_prefix(canonical).ok())
        .unwrap_or(path)
}

fn steps(path: &Path) -> impl Iterator<Item = Step> + '_ {
    path.components().filter_map(|c| match c {
        Component::Normal(name) => Some(Step::Name(name.to_os_string())),
        Component::ParentDir => Some(Step::Parent),
        Component::RootDir | Component::CurDir | Component::Prefix(_) => None,
    })
}

fn check_length(path: &Path) -> Result<(), CanonicalizeError> {
    let too_long = path.as_os_str().len() > PATH_MAX
        || path.components().any(|c| match c {
            Component::Normal(name) => name.len() > NAME_MAX,
            _ => false,
        });

    if too_long {
        Err(CanonicalizeError::NameTooLong(path.to_path_buf()))
    } else {
        Ok(())
    }
}

fn classify_io_error(path: &Path, err: io::Error) -> CanonicalizeError {
    if err.kind() == io::ErrorKind::NotFound {
        return CanonicalizeError::NotFound(path.to_path_buf());
    }
    match err.raw_os_error() {
        #[cfg(unix)]
        Some(libc::ENAMETOOLONG) => CanonicalizeError::NameTooLong(path.to_path_buf()),
        #[cfg(unix)]
        Some(libc::ELOOP) => CanonicalizeError::TooManyLinks(path.to_path_buf()),
        _ => CanonicalizeError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    }
}
