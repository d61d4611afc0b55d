//! Skill descriptor (`SKILL.md`) front matter.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{FRONT_MATTER_DELIMITER, SKILL_FILE};
use crate::manifest::Field;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Parsed front matter of a skill descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillFrontMatter {
    /// Skill name.
    #[serde(default)]
    pub name: Field<String>,

    /// What the skill does and when to use it.
    #[serde(default)]
    pub description: Field<String>,

    /// Optional skill version.
    #[serde(default)]
    pub version: Field<String>,
}

/// Why a descriptor has no usable front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterError {
    /// First line is not the `---` delimiter.
    MissingOpeningDelimiter,
    /// No closing `---` line after the opening one.
    MissingClosingDelimiter,
    /// The block is not valid YAML.
    InvalidYaml(String),
    /// The block is valid YAML but not a mapping.
    NotAMapping,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Path of the descriptor file in a skill directory.
pub fn descriptor_path(skill_dir: &Path) -> PathBuf {
    skill_dir.join(SKILL_FILE)
}

/// Return the text between the opening and closing delimiter lines.
pub fn extract_front_matter(content: &str) -> Result<&str, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let first = lines.next().ok_or(FrontMatterError::MissingOpeningDelimiter)?;
    if first.trim_end() != FRONT_MATTER_DELIMITER {
        return Err(FrontMatterError::MissingOpeningDelimiter);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            return Ok(&content[start..offset]);
        }
        offset += line.len();
    }

    Err(FrontMatterError::MissingClosingDelimiter)
}

/// Parse the front matter block of a descriptor.
pub fn parse_front_matter(content: &str) -> Result<SkillFrontMatter, FrontMatterError> {
    let block = extract_front_matter(content)?;
    if block.trim().is_empty() {
        return Ok(SkillFrontMatter::default());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?;

    match value {
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
            .map_err(|e| FrontMatterError::InvalidYaml(e.to_string())),
        // Comment-only blocks parse as null.
        serde_yaml::Value::Null => Ok(SkillFrontMatter::default()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for FrontMatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOpeningDelimiter => {
                write!(f, "descriptor does not start with a `---` line")
            }
            Self::MissingClosingDelimiter => write!(f, "front matter has no closing `---` line"),
            Self::InvalidYaml(e) => write!(f, "front matter is not valid YAML: {}", e),
            Self::NotAMapping => write!(f, "front matter is not a key/value mapping"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let content = r#"---
name: greeter
description: Greets people politely
version: 1.2.0
---

# Greeter
"#;
        let fm = parse_front_matter(content).unwrap();
        assert_eq!(fm.name.as_present().map(String::as_str), Some("greeter"));
        assert_eq!(
            fm.description.as_present().map(String::as_str),
            Some("Greets people politely")
        );
        assert_eq!(fm.version.as_present().map(String::as_str), Some("1.2.0"));
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\nname: x\r\ndescription: y\r\n---\r\nbody\r\n";
        let fm = parse_front_matter(content).unwrap();
        assert_eq!(fm.name.as_present().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_missing_delimiters() {
        assert_eq!(
            parse_front_matter("# Just markdown\n").unwrap_err(),
            FrontMatterError::MissingOpeningDelimiter
        );
        assert_eq!(
            parse_front_matter("---\nname: x\n").unwrap_err(),
            FrontMatterError::MissingClosingDelimiter
        );
        assert_eq!(
            parse_front_matter("").unwrap_err(),
            FrontMatterError::MissingOpeningDelimiter
        );
    }

    #[test]
    fn test_invalid_yaml_and_shapes() {
        assert!(matches!(
            parse_front_matter("---\nname: [unclosed\n---\n"),
            Err(FrontMatterError::InvalidYaml(_))
        ));
        assert_eq!(
            parse_front_matter("---\n- a\n- b\n---\n").unwrap_err(),
            FrontMatterError::NotAMapping
        );
    }

    #[test]
    fn test_empty_block_has_no_keys() {
        let fm = parse_front_matter("---\n---\n").unwrap();
        assert!(fm.name.is_missing());
        assert!(fm.description.is_missing());
    }

    #[test]
    fn test_version_number_is_mistyped() {
        let fm = parse_front_matter("---\nname: x\ndescription: y\nversion: 2\n---\n").unwrap();
        assert!(matches!(fm.version, Field::Invalid(_)));
    }
}
