//! Error types for bundle-cli.

use std::path::PathBuf;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for bundle-cli operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Error type for bundle-cli operations.
///
/// Scaffolding and merging are fail-fast and surface the first of these.
/// Validation never returns them for individual problems; it collects
/// [`ValidationIssue`](crate::validate::ValidationIssue)s instead.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A path the operation depends on does not exist.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The bundle directory has no manifest file.
    #[error("Manifest not found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// A manifest or connector file could not be parsed.
    #[error("Malformed document {}: {message}", path.display())]
    MalformedDocument { path: PathBuf, message: String },

    /// The target bundle directory already exists.
    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The target skill directory already exists.
    #[error("Skill already exists: {}", .0.display())]
    SkillAlreadyExists(PathBuf),

    /// A bundle, skill or connector name is not a valid slug.
    #[error("Invalid {kind} name '{name}'")]
    InvalidName { kind: &'static str, name: String },

    /// The transport is neither `stdio` nor `http`.
    #[error("Invalid transport '{transport}'")]
    InvalidTransport {
        transport: String,
        suggestion: Option<String>,
    },

    /// A connector field required by its transport was not supplied.
    #[error("Missing connector field `{field}` for {transport} transport")]
    MissingConnectorField {
        field: &'static str,
        transport: String,
    },

    /// Validation produced at least one blocking finding.
    #[error("Validation failed with {errors} error(s)")]
    ValidationFailed { errors: usize },

    /// User cancelled an interactive prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}
