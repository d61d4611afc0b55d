//! Where a bundle's connector definitions live.
//!
//! Resolution order is the storage policy:
//!
//! 1. A non-empty inline `mcpServers` mapping is authoritative. An external
//!    file next to it is shadowed and only reported.
//! 2. Otherwise the conventional `.mcp.json` is used when it exists. A string
//!    `mcpServers` is only cross-checked against it, never followed.
//! 3. A string `mcpServers` with no `.mcp.json` on disk is unresolved.
//! 4. An empty inline mapping with no external file is still inline storage.

use std::path::{Path, PathBuf};

use crate::constants::CONNECTOR_FILE;
use crate::manifest::{BundleManifest, Field, McpServersValue};
use crate::paths::normalize_entry;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Resolved connector storage of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorSource {
    /// No connectors are declared anywhere.
    Absent,

    /// Entries live in the manifest's `mcpServers` mapping.
    Inline {
        /// Conventional external file that exists but is ignored.
        shadowed: Option<PathBuf>,
    },

    /// Entries live in the conventional external file.
    External {
        /// Path of the existing `.mcp.json`.
        path: PathBuf,
        /// Path string from the manifest, when `mcpServers` is a reference.
        referenced: Option<String>,
    },

    /// `mcpServers` is a path string but the bundle has no `.mcp.json`.
    Unresolved {
        /// Path string from the manifest.
        reference: String,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Conventional external connector file of a bundle.
pub fn external_connector_path(bundle_dir: &Path) -> PathBuf {
    bundle_dir.join(CONNECTOR_FILE)
}

/// Resolve which storage holds the authoritative connector definitions.
pub fn resolve_source(bundle_dir: &Path, manifest: &BundleManifest) -> ConnectorSource {
    let conventional = external_connector_path(bundle_dir);
    let conventional_exists = conventional.is_file();

    match &manifest.mcp_servers {
        Field::Present(McpServersValue::Inline(map)) if !map.is_empty() => {
            ConnectorSource::Inline {
                shadowed: conventional_exists.then_some(conventional),
            }
        }
        _ if conventional_exists => ConnectorSource::External {
            path: conventional,
            referenced: manifest.connector_path().map(str::to_string),
        },
        Field::Present(McpServersValue::Path(reference)) => ConnectorSource::Unresolved {
            reference: reference.clone(),
        },
        Field::Present(McpServersValue::Inline(_)) => ConnectorSource::Inline { shadowed: None },
        _ => ConnectorSource::Absent,
    }
}

/// Returns true if a manifest reference points at the conventional file.
pub fn is_conventional_reference(reference: &str) -> bool {
    normalize_entry(reference) == CONNECTOR_FILE
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn manifest(value: serde_json::Value) -> BundleManifest {
        BundleManifest::from_value(&value).unwrap()
    }

    #[test]
    fn test_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_source(dir.path(), &manifest(json!({}))),
            ConnectorSource::Absent
        );
    }

    #[test]
    fn test_conventional_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".mcp.json"), "{}").unwrap();
        assert_eq!(
            resolve_source(dir.path(), &manifest(json!({}))),
            ConnectorSource::External {
                path: dir.path().join(".mcp.json"),
                referenced: None,
            }
        );
    }

    #[test]
    fn test_inline_shadows_external() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".mcp.json"), "{}").unwrap();
        let m = manifest(json!({ "mcpServers": { "a": { "command": "x" } } }));
        assert_eq!(
            resolve_source(dir.path(), &m),
            ConnectorSource::Inline {
                shadowed: Some(dir.path().join(".mcp.json"))
            }
        );
    }

    #[test]
    fn test_empty_inline_defers_to_external() {
        let dir = TempDir::new().unwrap();
        let m = manifest(json!({ "mcpServers": {} }));
        assert_eq!(
            resolve_source(dir.path(), &m),
            ConnectorSource::Inline { shadowed: None }
        );

        std::fs::write(dir.path().join(".mcp.json"), "{}").unwrap();
        assert!(matches!(
            resolve_source(dir.path(), &m),
            ConnectorSource::External { .. }
        ));
    }

    #[test]
    fn test_reference_is_cross_checked_only() {
        let dir = TempDir::new().unwrap();
        let m = manifest(json!({ "mcpServers": "./config/servers.json" }));
        assert_eq!(
            resolve_source(dir.path(), &m),
            ConnectorSource::Unresolved {
                reference: "./config/servers.json".into(),
            }
        );

        std::fs::write(dir.path().join(".mcp.json"), "{}").unwrap();
        assert_eq!(
            resolve_source(dir.path(), &m),
            ConnectorSource::External {
                path: dir.path().join(".mcp.json"),
                referenced: Some("./config/servers.json".into()),
            }
        );
        assert!(is_conventional_reference("./.mcp.json"));
        assert!(!is_conventional_reference("./config/servers.json"));
    }
}
