//! Integration tests for Configuration System

use crate::integration::test_utils::{file_names, with_config_env};
use dropin::config::{ConfigLoader, DropinConfig};
use dropin::{find_dropin_paths_for_config, write_drop_in, LookupPaths, UnitScope};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn load_config(root: &Path, use_unit_path_cache: bool) -> DropinConfig {
    let config_file = root.join("dropin.toml");
    fs::write(
        &config_file,
        format!(
            r#"
root = "{}"
extra_lookup_paths = ["/opt/units"]
use_unit_path_cache = {}
"#,
            root.display(),
            use_unit_path_cache
        ),
    )
    .unwrap();

    ConfigLoader::load_from_file(&config_file).unwrap()
}

#[test]
fn test_config_drives_a_full_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp_dir.path()).unwrap();

    let config = load_config(&root, false);
    let lookup = LookupPaths::from_config(&config);
    assert_eq!(lookup.scope, UnitScope::System);
    assert_eq!(lookup.paths[0], root.join("opt/units"));
    assert_eq!(lookup.paths[1], root.join("etc/systemd/system"));

    write_drop_in(&lookup.paths[0], "svc.service", 90, "extra", "").unwrap();
    write_drop_in(&lookup.paths[1], "svc.service", 10, "admin", "").unwrap();
    write_drop_in(&lookup.paths[1], "svc@.service", 20, "template", "").unwrap();

    let names = ["svc.service", "svc@a.service"];
    let uncached = find_dropin_paths_for_config(&config, names).unwrap();
    assert!(uncached.found);
    assert_eq!(
        file_names(&uncached.files),
        vec!["10-admin.conf", "20-template.conf", "90-extra.conf"]
    );

    let cached_config = load_config(&root, true);
    assert!(cached_config.use_unit_path_cache);
    let cached = find_dropin_paths_for_config(&cached_config, names).unwrap();
    assert_eq!(cached, uncached);
}

#[test]
fn test_config_lookup_without_dropins() {
    let temp_dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp_dir.path()).unwrap();

    for use_unit_path_cache in [false, true] {
        let config = load_config(&root, use_unit_path_cache);
        let search = find_dropin_paths_for_config(&config, ["absent.service"]).unwrap();
        assert!(!search.found);
        assert!(search.files.is_empty());
    }
}

#[test]
fn test_layered_load_reads_global_file_and_env() {
    let temp_dir = TempDir::new().unwrap();

    let config = with_config_env(
        &temp_dir,
        &[
            ("DROPIN_FILE_SUFFIX", ".override"),
            ("DROPIN_LOGGING__LEVEL", "debug"),
        ],
        |config_home| {
            fs::write(
                config_home.join("dropin/config.toml"),
                "scope = \"user\"\nextra_lookup_paths = [\"/srv/units\"]\n",
            )
            .unwrap();
            ConfigLoader::load().unwrap()
        },
    );

    assert_eq!(config.scope, UnitScope::User);
    assert_eq!(config.extra_lookup_paths, vec![PathBuf::from("/srv/units")]);
    assert_eq!(config.file_suffix(), Some(".override"));
    assert_eq!(config.dir_suffix, ".d");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_layered_load_defaults_without_sources() {
    let temp_dir = TempDir::new().unwrap();

    let config = with_config_env(&temp_dir, &[], |_| ConfigLoader::load().unwrap());

    let defaults = DropinConfig::default();
    assert_eq!(config.scope, defaults.scope);
    assert_eq!(config.dir_suffix, defaults.dir_suffix);
    assert_eq!(config.file_suffix, defaults.file_suffix);
    assert!(!config.use_unit_path_cache);
}
