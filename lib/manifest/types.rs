//! Typed view of a bundle manifest.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::field::Field;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Bundle manifest (`.manifest/bundle.json`).
///
/// Read-side schema only: every key is a [`Field`] so validation can tell
/// missing, mistyped and present values apart. Writes go through
/// [`ManifestDocument`](super::ManifestDocument), which preserves keys this
/// schema does not know about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleManifest {
    /// Unique bundle slug.
    #[serde(default)]
    pub name: Field<String>,

    /// Semantic version.
    #[serde(default)]
    pub version: Field<String>,

    /// Brief description.
    #[serde(default)]
    pub description: Field<String>,

    /// Author information.
    #[serde(default)]
    pub author: Field<BundleAuthor>,

    /// Skill directories relative to the bundle root.
    #[serde(default)]
    pub skills: Field<Vec<Field<String>>>,

    /// Command files relative to the bundle root.
    #[serde(default)]
    pub commands: Field<Vec<Field<String>>>,

    /// Agent files relative to the bundle root.
    #[serde(default)]
    pub agents: Field<Vec<Field<String>>>,

    /// Alternate component declaration used by some hosts.
    #[serde(default)]
    pub components: Field<Map<String, Value>>,

    /// Connector definitions, inline or as a path to an external file.
    #[serde(default, rename = "mcpServers")]
    pub mcp_servers: Field<McpServersValue>,
}

/// Author information.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleAuthor {
    /// Author name.
    #[serde(default)]
    pub name: Field<String>,

    /// Author email.
    #[serde(default)]
    pub email: Field<String>,
}

/// The two storage shapes of `mcpServers` in a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum McpServersValue {
    /// Path to an external connector file.
    Path(String),
    /// Connector entries embedded in the manifest.
    Inline(Map<String, Value>),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl BundleManifest {
    /// Build the typed view from a parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Returns true if the manifest declares any capability list.
    pub fn declares_capabilities(&self) -> bool {
        self.skills.is_declared() || self.components.is_declared()
    }

    /// Inline connector entries, if `mcpServers` is a mapping.
    pub fn inline_connectors(&self) -> Option<&Map<String, Value>> {
        match self.mcp_servers.as_present() {
            Some(McpServersValue::Inline(map)) => Some(map),
            _ => None,
        }
    }

    /// External connector path, if `mcpServers` is a string.
    pub fn connector_path(&self) -> Option<&str> {
        match self.mcp_servers.as_present() {
            Some(McpServersValue::Path(path)) => Some(path),
            _ => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
