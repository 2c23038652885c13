//! Drop-in resolution and generation
//!
//! Drop-ins are configuration fragments stored in `<unit>.d/` directories next
//! to unit files. This module builds fragment paths, writes new fragments, and
//! finds every fragment that applies to a unit across the lookup paths,
//! including those of the unit's template.

pub mod aggregate;
pub mod paths;
pub mod resolve;
pub mod write;

pub use aggregate::{find_dropin_paths, find_dropin_paths_for_config, DropInSearch};
pub use paths::{build_drop_in_paths, DropInPaths, DROPIN_DIR_SUFFIX, DROPIN_FILE_SUFFIX};
pub use resolve::{find_unit_dropin_dirs, DropinResolver};
pub use write::{write_drop_in, write_drop_in_fmt, DROPIN_DIR_MODE};
