//! Path canonicalization and filename escaping

pub mod canonicalize;
pub mod escape;

pub use canonicalize::canonicalize_under;
pub use escape::{filename_is_valid, xescape};
