//! Path validation utilities.

use std::path::{Path, PathBuf};

use crate::paths::resolve_within;

use super::super::codes::ErrorCode;
use super::super::result::ValidationResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolve a manifest path entry, reporting it if it escapes the bundle.
///
/// Returns `None` when the entry must not be checked any further.
pub fn resolve_entry(
    dir: &Path,
    entry: &str,
    location: &str,
    result: &mut ValidationResult,
) -> Option<PathBuf> {
    let resolved = resolve_within(dir, entry);
    if resolved.is_none() {
        result
            .error(
                ErrorCode::PathEscapesBundle,
                "path escapes bundle directory",
                location,
                format!("`{}` references a path outside the bundle", entry),
            )
            .help("use a relative path within the bundle directory");
    }
    resolved
}

/// Display a path relative to the bundle root.
pub fn display_relative(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
