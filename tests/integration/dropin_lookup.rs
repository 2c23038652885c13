//! Integration tests for drop-in discovery across lookup paths

use crate::integration::test_utils::file_names;
use dropin::diagnostics::RecordingDiagnostics;
use dropin::{
    find_dropin_paths, write_drop_in, DropinResolver, ScannedUnitPaths, UnitPathCache,
};
use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::PathBuf;
use tempfile::TempDir;

struct Layout {
    _temp_dir: TempDir,
    etc: PathBuf,
    run: PathBuf,
    lib: PathBuf,
}

impl Layout {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base = dunce::canonicalize(temp_dir.path()).unwrap();
        let etc = base.join("etc/systemd/system");
        let run = base.join("run/systemd/system");
        let lib = base.join("usr/lib/systemd/system");
        for dir in [&etc, &run, &lib] {
            fs::create_dir_all(dir).unwrap();
        }
        Self {
            _temp_dir: temp_dir,
            etc,
            run,
            lib,
        }
    }

    fn lookup_paths(&self) -> Vec<PathBuf> {
        vec![self.etc.clone(), self.run.clone(), self.lib.clone()]
    }
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_template_dropins_apply_to_instances() {
    let layout = Layout::new();
    write_drop_in(&layout.lib, "getty@.service", 10, "vendor", "").unwrap();
    write_drop_in(&layout.etc, "getty@tty1.service", 50, "local", "").unwrap();

    let search = find_dropin_paths(
        None,
        &layout.lookup_paths(),
        None,
        ".d",
        Some(".conf"),
        &names(&["getty@tty1.service"]),
    )
    .unwrap();

    assert!(search.found);
    assert_eq!(
        search.files,
        vec![
            layout.lib.join("getty@.service.d/10-vendor.conf"),
            layout.etc.join("getty@tty1.service.d/50-local.conf"),
        ]
    );
}

#[test]
fn test_only_template_dir_present() {
    let layout = Layout::new();
    fs::create_dir_all(layout.run.join("foo@.service.d")).unwrap();
    fs::write(layout.run.join("foo@.service.d/override.conf"), "").unwrap();

    let search = find_dropin_paths(
        None,
        &layout.lookup_paths(),
        None,
        ".d",
        Some(".conf"),
        &names(&["foo@bar.service"]),
    )
    .unwrap();

    assert_eq!(file_names(&search.files), vec!["override.conf"]);
}

#[test]
fn test_higher_priority_path_masks_same_named_fragment() {
    let layout = Layout::new();
    write_drop_in(&layout.lib, "db.service", 50, "tuning", "vendor").unwrap();
    write_drop_in(&layout.etc, "db.service", 50, "tuning", "admin").unwrap();
    write_drop_in(&layout.run, "db.service", 0, "runtime", "runtime").unwrap();

    let search = find_dropin_paths(
        None,
        &layout.lookup_paths(),
        None,
        ".d",
        Some(".conf"),
        &names(&["db.service"]),
    )
    .unwrap();

    assert_eq!(
        search.files,
        vec![
            layout.run.join("db.service.d/0-runtime.conf"),
            layout.etc.join("db.service.d/50-tuning.conf"),
        ]
    );
    assert_eq!(fs::read_to_string(&search.files[1]).unwrap(), "admin");
}

#[test]
fn test_aliases_are_merged() {
    let layout = Layout::new();
    write_drop_in(&layout.etc, "db.service", 20, "a", "").unwrap();
    write_drop_in(&layout.etc, "database.service", 10, "b", "").unwrap();

    let search = find_dropin_paths(
        None,
        &layout.lookup_paths(),
        None,
        ".d",
        Some(".conf"),
        &names(&["db.service", "database.service"]),
    )
    .unwrap();

    assert_eq!(file_names(&search.files), vec!["10-b.conf", "20-a.conf"]);
}

#[test]
fn test_wants_directory_lists_every_file() {
    let layout = Layout::new();
    let wants = layout.etc.join("multi-user.target.wants");
    fs::create_dir_all(&wants).unwrap();
    symlink(layout.lib.join("db.service"), wants.join("db.service")).unwrap();
    symlink(layout.lib.join("web.service"), wants.join("web.service")).unwrap();

    let search = find_dropin_paths(
        None,
        &layout.lookup_paths(),
        None,
        ".wants",
        None,
        &names(&["multi-user.target"]),
    )
    .unwrap();

    assert!(search.found);
    assert_eq!(file_names(&search.files), vec!["db.service", "web.service"]);
}

#[test]
fn test_symlinked_dropin_dir_is_canonicalized() {
    let layout = Layout::new();
    fs::create_dir_all(layout.lib.join("shared.d")).unwrap();
    fs::write(layout.lib.join("shared.d/10-shared.conf"), "").unwrap();
    symlink(layout.lib.join("shared.d"), layout.etc.join("app.service.d")).unwrap();

    let search = find_dropin_paths(
        None,
        &layout.lookup_paths(),
        None,
        ".d",
        Some(".conf"),
        &names(&["app.service"]),
    )
    .unwrap();

    assert_eq!(
        search.files,
        vec![layout.lib.join("shared.d/10-shared.conf")]
    );
}

#[test]
fn test_scanned_cache_matches_uncached_result() {
    let layout = Layout::new();
    write_drop_in(&layout.etc, "foo@.service", 10, "t", "").unwrap();
    write_drop_in(&layout.lib, "foo@one.service", 20, "i", "").unwrap();

    let lookup_paths = layout.lookup_paths();
    let cache = ScannedUnitPaths::scan(&lookup_paths);
    assert!(cache.contains(&layout.etc.join("foo@.service.d")));

    let unit_names = names(&["foo@one.service"]);
    let uncached = DropinResolver::new()
        .find_dropin_paths(&lookup_paths, ".d", Some(".conf"), &unit_names)
        .unwrap();
    let cached = DropinResolver::new()
        .with_unit_path_cache(Some(&cache))
        .find_dropin_paths(&lookup_paths, ".d", Some(".conf"), &unit_names)
        .unwrap();

    assert_eq!(cached, uncached);
    assert_eq!(file_names(&cached.files), vec!["10-t.conf", "20-i.conf"]);
}

#[test]
fn test_missing_lookup_paths_are_quiet() {
    let layout = Layout::new();
    let diagnostics = RecordingDiagnostics::new();
    let lookup_paths = vec![layout.etc.join("does-not-exist"), layout.lib.clone()];

    let search = DropinResolver::new()
        .with_diagnostics(&diagnostics)
        .find_dropin_paths(&lookup_paths, ".d", Some(".conf"), ["nothing.service"])
        .unwrap();

    assert!(!search.found);
    assert!(search.files.is_empty());
    assert!(diagnostics.entries().is_empty());
}
