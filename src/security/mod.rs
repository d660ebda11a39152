//! Security utilities for legaldoc

pub mod filename;
pub mod path;

pub use filename::{sanitize_filename, SanitizedFilename, MAX_FILENAME_BYTES};
pub use path::{join_within_root, validate_path_component, PathSecurityError};
