//! Filesystem collaborators: directory creation, atomic writes, file listing

pub mod atomic;
pub mod conf_files;

pub use atomic::{ensure_dir, write_string_atomic};
pub use conf_files::{list_conf_files, ConfigFileLister, FsConfigFileLister};
