//! Placeholder sentinels written by the scaffolder.
//!
//! Generated bundles never contain inferred values. Every human-facing field
//! starts out as one of the sentinels below so validation can tell "never
//! filled in" apart from "legitimately empty".

use serde::Serialize;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Placeholder for a bundle description.
pub const BUNDLE_DESCRIPTION_PLACEHOLDER: &str = "TODO: Describe what this bundle provides";

/// Placeholder for the author name.
pub const AUTHOR_NAME_PLACEHOLDER: &str = "TODO: Your Name";

/// Placeholder for the author email.
pub const AUTHOR_EMAIL_PLACEHOLDER: &str = "TODO: you@example.com";

/// Placeholder for a skill description.
pub const SKILL_DESCRIPTION_PLACEHOLDER: &str =
    "TODO: Describe what this skill does and when it should be used";

/// Example addresses treated as unfilled when they are the whole value.
const EXAMPLE_EMAILS: &[&str] = &["you@example.com", "user@example.com", "author@example.com"];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Recognized placeholder sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// Value starts with `TODO`.
    Todo,
    /// Value starts with `FIXME`.
    Fixme,
    /// Value starts with `REPLACE_ME`.
    ReplaceMe,
    /// Value starts with an unexpanded `{{` template variable.
    TemplateVariable,
    /// Value is exactly one of the example email addresses.
    ExampleEmail,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Placeholder {
    /// Every sentinel, in detection order.
    pub const ALL: [Placeholder; 5] = [
        Placeholder::Todo,
        Placeholder::Fixme,
        Placeholder::ReplaceMe,
        Placeholder::TemplateVariable,
        Placeholder::ExampleEmail,
    ];

    /// Return the sentinel a value matches, if any.
    pub fn detect(value: &str) -> Option<Placeholder> {
        let value = value.trim();
        Self::ALL.into_iter().find(|p| p.matches(value))
    }

    /// Check a single sentinel against an already trimmed value.
    fn matches(&self, value: &str) -> bool {
        match self {
            Placeholder::Todo => value.starts_with("TODO"),
            Placeholder::Fixme => value.starts_with("FIXME"),
            Placeholder::ReplaceMe => value.starts_with("REPLACE_ME"),
            Placeholder::TemplateVariable => value.starts_with("{{"),
            Placeholder::ExampleEmail => EXAMPLE_EMAILS.contains(&value),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Placeholder::Todo => "TODO",
            Placeholder::Fixme => "FIXME",
            Placeholder::ReplaceMe => "REPLACE_ME",
            Placeholder::TemplateVariable => "{{...}}",
            Placeholder::ExampleEmail => "example email",
        };
        write!(f, "{}", token)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_placeholders_are_detected() {
        for value in [
            BUNDLE_DESCRIPTION_PLACEHOLDER,
            AUTHOR_NAME_PLACEHOLDER,
            AUTHOR_EMAIL_PLACEHOLDER,
            SKILL_DESCRIPTION_PLACEHOLDER,
        ] {
            assert_eq!(Placeholder::detect(value), Some(Placeholder::Todo));
        }
    }

    #[test]
    fn test_detect_each_sentinel() {
        assert_eq!(Placeholder::detect("FIXME later"), Some(Placeholder::Fixme));
        assert_eq!(
            Placeholder::detect("REPLACE_ME"),
            Some(Placeholder::ReplaceMe)
        );
        assert_eq!(
            Placeholder::detect("{{author}}"),
            Some(Placeholder::TemplateVariable)
        );
        assert_eq!(
            Placeholder::detect("  you@example.com "),
            Some(Placeholder::ExampleEmail)
        );
    }

    #[test]
    fn test_real_values_pass() {
        assert_eq!(Placeholder::detect("Jane Doe"), None);
        assert_eq!(Placeholder::detect("jane@example.org"), None);
        // Substrings are not enough, only prefixes or exact matches.
        assert_eq!(Placeholder::detect("Handles TODO lists"), None);
        assert_eq!(Placeholder::detect("contact you@example.com"), None);
    }
}
