//! Integration tests for drop-in generation

use dropin::{build_drop_in_paths, write_drop_in, write_drop_in_fmt, DropinError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_written_fragment_reads_back_exactly() {
    let temp_dir = TempDir::new().unwrap();
    let data = "[Service]\nEnvironment=A=1 B=2\n# trailing comment without newline";

    write_drop_in(temp_dir.path(), "web.service", 50, "environment", data).unwrap();

    let paths = build_drop_in_paths(temp_dir.path(), "web.service", 50, "environment").unwrap();
    assert_eq!(fs::read(&paths.file).unwrap(), data.as_bytes());
}

#[test]
fn test_formatted_fragment() {
    let temp_dir = TempDir::new().unwrap();

    dropin::write_drop_in_format!(temp_dir.path(), "web.service", 0, "key", "{}={}", "Key", 5)
        .unwrap();
    write_drop_in_fmt(
        temp_dir.path(),
        "web.service",
        1,
        "other",
        format_args!("[Unit]\nDescription={}\n", "Web"),
    )
    .unwrap();

    let dir = temp_dir.path().join("web.service.d");
    assert_eq!(fs::read_to_string(dir.join("0-key.conf")).unwrap(), "Key=5");
    assert_eq!(
        fs::read_to_string(dir.join("1-other.conf")).unwrap(),
        "[Unit]\nDescription=Web\n"
    );
}

#[test]
fn test_fragment_names_with_dots_and_slashes_do_not_collide() {
    let temp_dir = TempDir::new().unwrap();

    write_drop_in(temp_dir.path(), "web.service", 10, "a.b", "dot").unwrap();
    write_drop_in(temp_dir.path(), "web.service", 10, "a/b", "slash").unwrap();
    write_drop_in(temp_dir.path(), "web.service", 10, "a_b", "underscore").unwrap();

    let dir = temp_dir.path().join("web.service.d");
    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    assert_eq!(names.len(), 3);
    // Every fragment sits directly inside the .d directory.
    for name in &names {
        assert!(!name.contains('/'));
        assert!(name.ends_with(".conf"));
    }
}

#[test]
fn test_invalid_name_is_rejected_without_side_effects() {
    let temp_dir = TempDir::new().unwrap();
    let name = "x".repeat(256);

    let result = write_drop_in(temp_dir.path(), "web.service", 10, &name, "data");

    assert!(matches!(result, Err(DropinError::InvalidName(_))));
    assert!(!temp_dir.path().join("web.service.d").exists());
}
