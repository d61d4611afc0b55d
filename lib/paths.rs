//! Lexical handling of bundle-relative paths.
//!
//! Manifest entries are relative paths like `./skills/greeter`. These helpers
//! compare and resolve them without touching the filesystem, so results do
//! not depend on what exists on disk.

use std::path::{Component, Path, PathBuf};

use crate::constants::SKILLS_DIR;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Strip a leading `./` and trailing `/` so equivalent entries compare equal.
pub fn normalize_entry(entry: &str) -> &str {
    let trimmed = entry.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed.trim_end_matches('/')
}

/// Resolve a bundle-relative path, rejecting anything that escapes the bundle.
///
/// Absolute paths and `..` components that climb above the root return
/// `None`. `..` that stays inside (e.g. `skills/a/../b`) is accepted.
pub fn resolve_within(bundle_dir: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(normalize_entry(relative));
    let mut depth: usize = 0;

    for component in relative.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1)?,
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(bundle_dir.join(relative))
}

/// Returns true if an entry names a directory inside `skills/`.
pub fn is_under_skills_dir(entry: &str) -> bool {
    let components: Vec<_> = Path::new(normalize_entry(entry))
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    components.len() >= 2
        && matches!(components[0], Component::Normal(first) if first == SKILLS_DIR)
        && components[1..]
            .iter()
            .all(|c| matches!(c, Component::Normal(_)))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
