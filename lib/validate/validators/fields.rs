//! Required fields and format validation.

use crate::constants::MAX_NAME_LEN;
use crate::manifest::{BundleManifest, Field};
use crate::placeholder::Placeholder;

use super::super::codes::{ErrorCode, WarningCode};
use super::super::result::ValidationResult;
use super::core::{invalid_type, manifest_location, missing_field};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate required fields are present, non-empty and filled in.
pub fn validate_required_fields(manifest: &BundleManifest, result: &mut ValidationResult) {
    check_text_field(&manifest.name, "name", result);
    check_text_field(&manifest.version, "version", result);
    check_text_field(&manifest.description, "description", result);

    match &manifest.author {
        Field::Missing => missing_field(result, "author"),
        Field::Invalid(value) => {
            invalid_type(result, manifest_location("author"), "an object", value);
        }
        Field::Present(author) => {
            check_text_field(&author.name, "author.name", result);
            check_text_field(&author.email, "author.email", result);
        }
    }
}

/// Validate field value formats.
///
/// Placeholders are already reported by [`validate_required_fields`] and are
/// not checked again here.
pub fn validate_formats(manifest: &BundleManifest, result: &mut ValidationResult) {
    if let Some(name) = filled_in(&manifest.name)
        && !is_valid_bundle_name(name)
    {
        result
            .warning(
                WarningCode::InvalidBundleName,
                "invalid bundle name",
                manifest_location("name"),
                format!(
                    "`{}` must be lowercase alphanumeric with hyphens (max {} chars)",
                    name, MAX_NAME_LEN
                ),
            )
            .help("use format: my-bundle-name");
    }

    if let Some(version) = filled_in(&manifest.version)
        && semver::Version::parse(version.trim()).is_err()
    {
        result
            .warning(
                WarningCode::InvalidVersion,
                "invalid version",
                manifest_location("version"),
                format!("`{}` is not valid semver", version),
            )
            .help("use format: MAJOR.MINOR.PATCH (e.g., 1.0.0)");
    }
}

/// Validate a bundle or skill name.
///
/// Lowercase ASCII letters, digits and hyphens; starts with a letter or
/// digit; no trailing hyphen; at most 64 characters.
pub fn is_valid_bundle_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }

    let bytes = name.as_bytes();
    if !bytes[0].is_ascii_lowercase() && !bytes[0].is_ascii_digit() {
        return false;
    }
    if name.ends_with('-') {
        return false;
    }

    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Report a required string field: missing, mistyped, empty or placeholder.
fn check_text_field(field: &Field<String>, path: &str, result: &mut ValidationResult) {
    match field {
        Field::Missing => missing_field(result, path),
        Field::Invalid(value) => invalid_type(result, manifest_location(path), "a string", value),
        Field::Present(value) if value.trim().is_empty() => {
            result.error(
                ErrorCode::MissingRequiredField,
                "empty required field",
                manifest_location(path),
                format!("field `{}` must not be empty", path),
            );
        }
        Field::Present(value) => {
            if let Some(placeholder) = Placeholder::detect(value) {
                placeholder_warning(result, manifest_location(path), path, placeholder);
            }
        }
    }
}

/// Record a placeholder warning for a field.
pub fn placeholder_warning(
    result: &mut ValidationResult,
    location: String,
    field: &str,
    placeholder: Placeholder,
) {
    result
        .warning(
            WarningCode::PlaceholderPresent,
            "placeholder value",
            location,
            format!("`{}` still holds a {} placeholder", field, placeholder),
        )
        .help(format!("replace the placeholder in `{}`", field));
}

/// The value of a field that is present, non-empty and not a placeholder.
fn filled_in(field: &Field<String>) -> Option<&str> {
    field
        .as_present()
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty() && Placeholder::detect(v).is_none())
}
