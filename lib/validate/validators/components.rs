//! Command, agent and capability declaration validation.

use std::path::Path;

use crate::manifest::{BundleManifest, Field};

use super::super::codes::{ErrorCode, WarningCode};
use super::super::result::ValidationResult;
use super::core::{invalid_type, manifest_file, manifest_location};
use super::paths::resolve_entry;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate `commands`, `agents` and `components`.
pub fn validate_components(dir: &Path, manifest: &BundleManifest, result: &mut ValidationResult) {
    validate_file_list(dir, "commands", &manifest.commands, result);
    validate_file_list(dir, "agents", &manifest.agents, result);

    if let Field::Invalid(value) = &manifest.components {
        invalid_type(result, manifest_location("components"), "an object", value);
    }

    if !manifest.declares_capabilities() {
        result
            .warning(
                WarningCode::NoCapabilities,
                "no capabilities declared",
                manifest_file(),
                "manifest has neither `skills` nor `components`",
            )
            .help("add a skill with `bundle add-skill-to-bundle`");
    }
}

/// Check each path in a component list exists inside the bundle.
fn validate_file_list(
    dir: &Path,
    key: &str,
    list: &Field<Vec<Field<String>>>,
    result: &mut ValidationResult,
) {
    let entries = match list {
        Field::Missing => return,
        Field::Invalid(value) => {
            invalid_type(result, manifest_location(key), "an array", value);
            return;
        }
        Field::Present(entries) => entries,
    };

    for (index, entry) in entries.iter().enumerate() {
        let location = manifest_location(&format!("{}[{}]", key, index));
        let entry = match entry {
            Field::Present(entry) if !entry.trim().is_empty() => entry,
            Field::Invalid(value) => {
                invalid_type(result, location, "a path string", value);
                continue;
            }
            _ => {
                result.error(
                    ErrorCode::InvalidFieldType,
                    "empty path",
                    location,
                    format!("`{}` entries must be non-empty relative paths", key),
                );
                continue;
            }
        };

        let Some(path) = resolve_entry(dir, entry, &location, result) else {
            continue;
        };

        if !path.exists() {
            result.warning(
                WarningCode::ComponentPathMissing,
                "component not found",
                location,
                format!("`{}` does not exist", entry),
            );
        }
    }
}
