//! Bundle validation: manifest schema, skill descriptors and connectors.

mod codes;
mod result;

pub mod validators;


//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use codes::{ErrorCode, ValidationCode, WarningCode};
pub use result::{ValidationIssue, ValidationResult};
pub use validators::{is_valid_bundle_name, manifest_file, validate_bundle, validate_entry};
