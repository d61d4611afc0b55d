//! Skill entry and descriptor validation.

use std::collections::HashSet;
use std::path::Path;

use crate::manifest::{BundleManifest, Field};
use crate::paths::{is_under_skills_dir, normalize_entry};
use crate::placeholder::Placeholder;
use crate::skill::{SkillFrontMatter, descriptor_path, parse_front_matter};

use super::super::codes::{ErrorCode, WarningCode};
use super::super::result::ValidationResult;
use super::core::{invalid_type, manifest_location};
use super::fields::placeholder_warning;
use super::paths::{display_relative, resolve_entry};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate every entry of the `skills` array.
///
/// Duplicate entries (after normalization) are checked once, so a missing
/// skill is reported exactly once no matter how often it is listed.
pub fn validate_skills(dir: &Path, manifest: &BundleManifest, result: &mut ValidationResult) {
    let entries = match &manifest.skills {
        Field::Missing => return,
        Field::Invalid(value) => {
            invalid_type(result, manifest_location("skills"), "an array", value);
            return;
        }
        Field::Present(entries) => entries,
    };

    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let location = manifest_location(&format!("skills[{}]", index));

        let entry = match entry {
            Field::Present(entry) if !entry.trim().is_empty() => entry,
            Field::Present(_) | Field::Missing => {
                result.error(
                    ErrorCode::InvalidFieldType,
                    "empty skill path",
                    location,
                    "skill entries must be non-empty relative paths",
                );
                continue;
            }
            Field::Invalid(value) => {
                invalid_type(result, location, "a path string", value);
                continue;
            }
        };

        if !seen.insert(normalize_entry(entry).to_string()) {
            tracing::debug!(entry = %entry, "skipping duplicate skill entry");
            continue;
        }

        validate_skill_entry(dir, entry, &location, result);
    }
}

/// Validate one skill directory and its descriptor.
fn validate_skill_entry(dir: &Path, entry: &str, location: &str, result: &mut ValidationResult) {
    let Some(skill_dir) = resolve_entry(dir, entry, location, result) else {
        return;
    };

    if !is_under_skills_dir(entry) {
        result
            .warning(
                WarningCode::SkillOutsideSkillsDir,
                "skill outside skills/",
                location,
                format!("`{}` is not a directory under `skills/`", entry),
            )
            .help("move the skill to skills/<name>");
    }

    if !skill_dir.is_dir() {
        result
            .error(
                ErrorCode::ReferencedSkillMissing,
                "skill directory not found",
                location,
                format!("directory `{}` does not exist", entry),
            )
            .help("create it with `bundle add-skill-to-bundle` or remove the entry");
        return;
    }

    let descriptor = descriptor_path(&skill_dir);
    let descriptor_location = display_relative(dir, &descriptor);
    if !descriptor.exists() {
        result
            .error(
                ErrorCode::ReferencedSkillMissing,
                "skill descriptor not found",
                location,
                format!("`{}` does not exist", descriptor_location),
            )
            .help("add a SKILL.md with `name` and `description` front matter");
        return;
    }

    let content = match std::fs::read_to_string(&descriptor) {
        Ok(content) => content,
        Err(e) => {
            result.error(
                ErrorCode::SkillDescriptorMalformed,
                "cannot read skill descriptor",
                descriptor_location,
                format!("failed to read file: {}", e),
            );
            return;
        }
    };

    match parse_front_matter(&content) {
        Ok(front_matter) => {
            let dir_name = skill_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            validate_front_matter(&front_matter, &dir_name, &descriptor_location, result);
        }
        Err(e) => {
            result
                .warning(
                    WarningCode::SkillFrontMatterMissing,
                    "no front matter",
                    descriptor_location,
                    e.to_string(),
                )
                .help("start the file with a `---` block containing `name` and `description`");
        }
    }
}

/// Validate the keys of a parsed front matter block.
fn validate_front_matter(
    front_matter: &SkillFrontMatter,
    dir_name: &str,
    location: &str,
    result: &mut ValidationResult,
) {
    for (key, field) in [
        ("name", &front_matter.name),
        ("description", &front_matter.description),
    ] {
        match field {
            Field::Present(value) if !value.trim().is_empty() => {
                if let Some(placeholder) = Placeholder::detect(value) {
                    placeholder_warning(result, format!("{}:{}", location, key), key, placeholder);
                }
            }
            _ => {
                result.warning(
                    WarningCode::SkillFrontMatterIncomplete,
                    "incomplete front matter",
                    format!("{}:{}", location, key),
                    format!("`{}` must be a non-empty string", key),
                );
            }
        }
    }

    if let Some(name) = front_matter.name.as_present()
        && !name.trim().is_empty()
        && Placeholder::detect(name).is_none()
        && name.trim() != dir_name
    {
        result
            .warning(
                WarningCode::SkillNameMismatch,
                "skill name mismatch",
                format!("{}:name", location),
                format!("`{}` does not match directory `{}`", name, dir_name),
            )
            .help(format!("set `name: {}` or rename the directory", dir_name));
    }

    let bad_version = match &front_matter.version {
        Field::Missing => None,
        Field::Invalid(value) => Some(value.to_string()),
        Field::Present(version) => semver::Version::parse(version.trim())
            .is_err()
            .then(|| version.clone()),
    };
    if let Some(version) = bad_version {
        result.warning(
            WarningCode::InvalidVersion,
            "invalid skill version",
            format!("{}:version", location),
            format!("`{}` is not valid semver", version),
        );
    }
}
