//! Flattens a parsed tree into the directory and file paths it describes.

mod normalizer;
mod path_set;

pub use normalizer::Normalizer;
pub use path_set::PathSet;

/// Implicit root every generated path is relative to
pub const ROOT: &str = ".";

/// Joins a path segment onto an already normalized parent path.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    format!("{parent}/{name}")
}
