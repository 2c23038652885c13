//! Dropin: drop-in override resolution for service-manager units
//!
//! Locates the `<unit>.d/` override directories that apply to a unit across an
//! ordered set of lookup paths (including the directories of the unit's
//! template), merges the fragment files they contain into one ordered list,
//! and writes new fragments at a chosen priority level.

pub mod config;
pub mod diagnostics;
pub mod dropin;
pub mod error;
pub mod fs;
pub mod logging;
pub mod lookup;
pub mod path;
pub mod unit;

pub use dropin::{
    build_drop_in_paths, find_dropin_paths, find_dropin_paths_for_config, find_unit_dropin_dirs,
    write_drop_in, write_drop_in_fmt, DropInPaths, DropInSearch, DropinResolver,
};
pub use error::{DropinError, Result};
pub use lookup::{LookupPaths, ScannedUnitPaths, UnitPathCache, UnitScope};
