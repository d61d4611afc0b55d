//! Validation functions for bundles.

mod components;
mod connectors;
mod core;
mod paths;
mod skills;

pub mod fields;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use connectors::validate_entry;
pub use core::{manifest_file, validate_bundle};
pub use fields::is_valid_bundle_name;
