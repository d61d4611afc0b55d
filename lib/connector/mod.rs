//! Connector (MCP server) definitions: schema, storage resolution and merging.

mod merge;
mod source;
mod types;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use merge::{MergeOutcome, merge_entry};
pub use source::{
    ConnectorSource, external_connector_path, is_conventional_reference, resolve_source,
};
pub use types::{ConnectorEntry, ConnectorSpec, Transport, TransportKind};
