//! Bundle manifest schema and document handling.

mod document;
mod field;
mod types;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use document::{ManifestDocument, manifest_path};
pub use field::{Field, json_type_name};
pub use types::{BundleAuthor, BundleManifest, McpServersValue};
