//! Environment-variable interpolation in connector values.
//!
//! Connector `env`, `args` and `headers` values may reference the host
//! environment as `${NAME}` or `${NAME:-fallback}`. The host performs the
//! expansion; this module only inspects values.

use regex::Regex;
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Regex pattern for environment variable references.
pub const ENV_VAR_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-[^}]*)?\}";

/// Compiled regex for environment variable extraction.
static ENV_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENV_VAR_PATTERN).expect("Invalid regex pattern"));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Extract all environment variable names referenced by a string.
pub fn extract_env_vars(s: &str) -> Vec<String> {
    ENV_VAR_REGEX
        .captures_iter(s)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Check whether a string references at least one environment variable.
pub fn uses_interpolation(s: &str) -> bool {
    ENV_VAR_REGEX.is_match(s)
}

/// Check for a `${` that is never closed.
pub fn has_unterminated_interpolation(s: &str) -> bool {
    s.match_indices("${")
        .any(|(start, _)| !s[start + 2..].contains('}'))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_env_vars() {
        assert_eq!(
            extract_env_vars("Bearer ${API_TOKEN}"),
            vec!["API_TOKEN".to_string()]
        );
        assert_eq!(
            extract_env_vars("${HOST:-localhost}:${PORT}"),
            vec!["HOST".to_string(), "PORT".to_string()]
        );
        assert!(extract_env_vars("plain value").is_empty());
    }

    #[test]
    fn test_uses_interpolation() {
        assert!(uses_interpolation("${TOKEN}"));
        assert!(!uses_interpolation("$TOKEN"));
        assert!(!uses_interpolation("${1BAD}"));
    }

    #[test]
    fn test_unterminated_interpolation() {
        assert!(has_unterminated_interpolation("Bearer ${TOKEN"));
        assert!(has_unterminated_interpolation("${A} and ${B"));
        assert!(!has_unterminated_interpolation("${A} and ${B}"));
        assert!(!has_unterminated_interpolation("no vars"));
    }
}
