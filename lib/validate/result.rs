//! Validation result types.

use serde::Serialize;

use super::codes::{ErrorCode, ValidationCode, WarningCode};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation result with categorized issues.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Validation errors (always fail).
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (fail with --strict).
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Error/warning code.
    pub code: ValidationCode,

    /// Short description (e.g., "missing required field").
    pub message: String,

    /// Location in the bundle (e.g., ".manifest/bundle.json:author.email").
    pub location: String,

    /// Detailed explanation.
    pub details: String,

    /// Optional help suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ValidationResult {
    /// Returns true if there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are no errors or warnings.
    pub fn is_strict_valid(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Append every finding of another result, keeping order.
    pub fn extend(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Record an error.
    pub fn error(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> &mut ValidationIssue {
        let index = self.errors.len();
        self.errors
            .push(ValidationIssue::new(code, message, location, details));
        &mut self.errors[index]
    }

    /// Record a warning.
    pub fn warning(
        &mut self,
        code: WarningCode,
        message: impl Into<String>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> &mut ValidationIssue {
        let index = self.warnings.len();
        self.warnings
            .push(ValidationIssue::new(code, message, location, details));
        &mut self.warnings[index]
    }

    /// Count findings with a given code.
    pub fn count(&self, code: impl Into<ValidationCode>) -> usize {
        let code = code.into();
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(|issue| issue.code == code)
            .count()
    }
}

impl ValidationIssue {
    /// Create an issue without a help line.
    pub fn new(
        code: impl Into<ValidationCode>,
        message: impl Into<String>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            location: location.into(),
            details: details.into(),
            help: None,
        }
    }

    /// Attach a help suggestion.
    pub fn help(&mut self, help: impl Into<String>) -> &mut Self {
        self.help = Some(help.into());
        self
    }
}
