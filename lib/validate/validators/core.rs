//! Core validation entry point and helpers.

use crate::constants::{MANIFEST_DIR, MANIFEST_FILE};
use crate::manifest::{BundleManifest, manifest_path};
use serde_json::Value;
use std::path::Path;

use super::super::codes::ErrorCode;
use super::super::result::ValidationResult;
use super::components::validate_components;
use super::connectors::validate_connectors;
use super::fields::{validate_formats, validate_required_fields};
use super::skills::validate_skills;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a bundle directory.
///
/// Every check runs and contributes to the returned report; only a missing
/// or unparseable manifest stops early. The bundle is never modified.
pub fn validate_bundle(dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    // 1. Check directory exists
    if !dir.is_dir() {
        result.error(
            ErrorCode::PathNotFound,
            "bundle directory not found",
            dir.display().to_string(),
            "directory does not exist",
        );
        return result;
    }

    // 2. Check the manifest exists
    let path = manifest_path(dir);
    if !path.is_file() {
        result
            .error(
                ErrorCode::PathNotFound,
                "manifest not found",
                dir.display().to_string(),
                format!("{} does not exist", manifest_file()),
            )
            .help("run `bundle create-bundle` to scaffold a bundle");
        return result;
    }

    // 3. Read file
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            result.error(
                ErrorCode::MalformedDocument,
                "cannot read manifest",
                manifest_file(),
                format!("failed to read file: {}", e),
            );
            return result;
        }
    };

    // 4. Parse JSON, then build the typed view
    let raw: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            result
                .error(
                    ErrorCode::MalformedDocument,
                    "invalid JSON",
                    manifest_file(),
                    format!("parse error: {}", e),
                )
                .help("check JSON syntax");
            return result;
        }
    };

    let manifest = match raw {
        Value::Object(_) => BundleManifest::from_value(&raw),
        ref other => {
            result.error(
                ErrorCode::MalformedDocument,
                "manifest is not an object",
                manifest_file(),
                format!(
                    "top-level value is {}",
                    crate::manifest::json_type_name(other)
                ),
            );
            return result;
        }
    };

    let manifest = match manifest {
        Ok(m) => m,
        Err(e) => {
            result.error(
                ErrorCode::MalformedDocument,
                "manifest does not match the schema",
                manifest_file(),
                e.to_string(),
            );
            return result;
        }
    };

    tracing::debug!(bundle = %dir.display(), "validating bundle");

    // 5. Required fields and placeholders
    validate_required_fields(&manifest, &mut result);

    // 6. Field formats
    validate_formats(&manifest, &mut result);

    // 7. Skills and their descriptors
    validate_skills(dir, &manifest, &mut result);

    // 8. Commands, agents and declared capabilities
    validate_components(dir, &manifest, &mut result);

    // 9. Connector definitions
    validate_connectors(dir, &manifest, &mut result);

    tracing::debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validation finished"
    );

    result
}

/// Manifest path relative to the bundle root, as shown in findings.
pub fn manifest_file() -> String {
    format!("{}/{}", MANIFEST_DIR, MANIFEST_FILE)
}

/// Location string for a manifest field.
pub fn manifest_location(field: &str) -> String {
    format!("{}:{}", manifest_file(), field)
}

/// Helper to add a missing required field error.
pub fn missing_field(result: &mut ValidationResult, field: &str) {
    result
        .error(
            ErrorCode::MissingRequiredField,
            "missing required field",
            manifest_location(field),
            format!("field `{}` is required", field),
        )
        .help(format!("add `{}` to {}", field, manifest_file()));
}

/// Helper to add a wrong-type error.
pub fn invalid_type(result: &mut ValidationResult, location: String, expected: &str, found: &Value) {
    result.error(
        ErrorCode::InvalidFieldType,
        "invalid field type",
        location,
        format!(
            "expected {}, found {}",
            expected,
            crate::manifest::json_type_name(found)
        ),
    );
}
