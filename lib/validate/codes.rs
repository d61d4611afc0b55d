//! Validation error and warning codes.

use serde::Serialize;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation error codes.
///
/// Any error makes a bundle undistributable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// E000: bundle directory or manifest does not exist.
    #[serde(rename = "E000")]
    PathNotFound,

    /// E001: manifest or connector file is not well-formed JSON.
    #[serde(rename = "E001")]
    MalformedDocument,

    /// E002: a required field is missing or empty.
    #[serde(rename = "E002")]
    MissingRequiredField,

    /// E003: a field has the wrong JSON type.
    #[serde(rename = "E003")]
    InvalidFieldType,

    /// E004: a skill listed in `skills` has no directory or descriptor.
    #[serde(rename = "E004")]
    ReferencedSkillMissing,

    /// E005: a skill descriptor exists but cannot be read as text.
    #[serde(rename = "E005")]
    SkillDescriptorMalformed,

    /// E006: a connector lacks the field its transport requires.
    #[serde(rename = "E006")]
    TransportFieldMissing,

    /// E007: a connector field has the wrong shape.
    #[serde(rename = "E007")]
    InvalidConnectorField,

    /// E008: a referenced path escapes the bundle directory.
    #[serde(rename = "E008")]
    PathEscapesBundle,
}

/// Validation warning codes.
///
/// Warnings never block distribution (unless `--strict`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// W001: a field still holds a scaffold placeholder.
    #[serde(rename = "W001")]
    PlaceholderPresent,

    /// W002: a connector declares a transport other than stdio or http.
    #[serde(rename = "W002")]
    UnknownTransport,

    /// W003: inline connectors and an external connector file both exist.
    #[serde(rename = "W003")]
    ConflictingConnectorStorage,

    /// W004: the manifest declares neither `skills` nor `components`.
    #[serde(rename = "W004")]
    NoCapabilities,

    /// W005: a skill descriptor has no parseable front matter block.
    #[serde(rename = "W005")]
    SkillFrontMatterMissing,

    /// W006: `mcpServers` references a path other than the connector file.
    #[serde(rename = "W006")]
    ConnectorPathMismatch,

    /// W007: `version` is not valid semver.
    #[serde(rename = "W007")]
    InvalidVersion,

    /// W008: `name` is not a valid bundle slug.
    #[serde(rename = "W008")]
    InvalidBundleName,

    /// W009: a connector carries fields of the other transport.
    #[serde(rename = "W009")]
    ForeignTransportField,

    /// W010: a `${` interpolation is never closed.
    #[serde(rename = "W010")]
    MalformedInterpolation,

    /// W011: an Authorization header holds a literal credential.
    #[serde(rename = "W011")]
    LiteralCredential,

    /// W012: a `commands` or `agents` entry does not exist.
    #[serde(rename = "W012")]
    ComponentPathMissing,

    /// W013: front matter `name` differs from the skill directory name.
    #[serde(rename = "W013")]
    SkillNameMismatch,

    /// W014: front matter lacks `name` or `description`.
    #[serde(rename = "W014")]
    SkillFrontMatterIncomplete,

    /// W015: a skill lives outside the `skills/` directory.
    #[serde(rename = "W015")]
    SkillOutsideSkillsDir,

    /// W016: an http connector url is not an http(s) URL.
    #[serde(rename = "W016")]
    InvalidUrl,
}

/// A validation code that can be either an error or warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationCode {
    /// An error code.
    Error(ErrorCode),
    /// A warning code.
    Warning(WarningCode),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::PathNotFound => "E000",
            ErrorCode::MalformedDocument => "E001",
            ErrorCode::MissingRequiredField => "E002",
            ErrorCode::InvalidFieldType => "E003",
            ErrorCode::ReferencedSkillMissing => "E004",
            ErrorCode::SkillDescriptorMalformed => "E005",
            ErrorCode::TransportFieldMissing => "E006",
            ErrorCode::InvalidConnectorField => "E007",
            ErrorCode::PathEscapesBundle => "E008",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            WarningCode::PlaceholderPresent => "W001",
            WarningCode::UnknownTransport => "W002",
            WarningCode::ConflictingConnectorStorage => "W003",
            WarningCode::NoCapabilities => "W004",
            WarningCode::SkillFrontMatterMissing => "W005",
            WarningCode::ConnectorPathMismatch => "W006",
            WarningCode::InvalidVersion => "W007",
            WarningCode::InvalidBundleName => "W008",
            WarningCode::ForeignTransportField => "W009",
            WarningCode::MalformedInterpolation => "W010",
            WarningCode::LiteralCredential => "W011",
            WarningCode::ComponentPathMissing => "W012",
            WarningCode::SkillNameMismatch => "W013",
            WarningCode::SkillFrontMatterIncomplete => "W014",
            WarningCode::SkillOutsideSkillsDir => "W015",
            WarningCode::InvalidUrl => "W016",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::Error(e) => write!(f, "{}", e),
            ValidationCode::Warning(w) => write!(f, "{}", w),
        }
    }
}

impl From<ErrorCode> for ValidationCode {
    fn from(code: ErrorCode) -> Self {
        ValidationCode::Error(code)
    }
}

impl From<WarningCode> for ValidationCode {
    fn from(code: WarningCode) -> Self {
        ValidationCode::Warning(code)
    }
}
