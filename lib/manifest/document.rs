//! Raw, order-preserving manifest document.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::constants::{MANIFEST_DIR, MANIFEST_FILE, MCP_SERVERS_KEY};
use crate::error::{BundleError, BundleResult};
use crate::paths::normalize_entry;
use crate::persist::{read_json, write_json_atomic};

use super::types::BundleManifest;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A manifest loaded as a JSON object, for non-destructive edits.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    /// Path of the manifest file.
    pub path: PathBuf,
    /// Top-level object, in file order.
    pub root: Map<String, Value>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Path of the manifest file for a bundle directory.
pub fn manifest_path(bundle_dir: &Path) -> PathBuf {
    bundle_dir.join(MANIFEST_DIR).join(MANIFEST_FILE)
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ManifestDocument {
    /// Load the manifest of a bundle directory.
    pub fn load(bundle_dir: &Path) -> BundleResult<Self> {
        let path = manifest_path(bundle_dir);
        if !path.exists() {
            return Err(BundleError::ManifestNotFound(bundle_dir.to_path_buf()));
        }

        match read_json(&path)? {
            Value::Object(root) => Ok(Self { path, root }),
            other => Err(BundleError::MalformedDocument {
                path,
                message: format!(
                    "manifest root must be an object, found {}",
                    super::field::json_type_name(&other)
                ),
            }),
        }
    }

    /// Write the document back atomically.
    pub fn save(&self) -> BundleResult<()> {
        write_json_atomic(&self.path, &Value::Object(self.root.clone()))
    }

    /// Typed view of the current contents.
    pub fn typed(&self) -> BundleResult<BundleManifest> {
        Ok(BundleManifest::deserialize_map(&self.root)?)
    }

    /// Append a skill path to `skills` unless it is already listed.
    ///
    /// Returns true if the list changed. A missing `skills` key is created.
    pub fn register_skill(&mut self, entry: &str) -> BundleResult<bool> {
        let skills = self
            .root
            .entry("skills")
            .or_insert_with(|| Value::Array(Vec::new()));

        let Value::Array(list) = skills else {
            return Err(BundleError::MalformedDocument {
                path: self.path.clone(),
                message: "`skills` must be an array".into(),
            });
        };

        let normalized = normalize_entry(entry);
        if list
            .iter()
            .filter_map(Value::as_str)
            .any(|existing| normalize_entry(existing) == normalized)
        {
            return Ok(false);
        }

        list.push(Value::String(entry.to_string()));
        Ok(true)
    }

    /// Inline `mcpServers` mapping, created empty if absent.
    ///
    /// Fails if `mcpServers` holds something other than a mapping.
    pub fn inline_connectors_mut(&mut self) -> BundleResult<&mut Map<String, Value>> {
        let servers = self
            .root
            .entry(MCP_SERVERS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if servers.is_null() {
            *servers = Value::Object(Map::new());
        }

        match servers {
            Value::Object(map) => Ok(map),
            _ => Err(BundleError::MalformedDocument {
                path: self.path.clone(),
                message: format!("`{}` is not an inline mapping", MCP_SERVERS_KEY),
            }),
        }
    }
}

impl BundleManifest {
    /// Build the typed view from a JSON object.
    pub fn deserialize_map(root: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        Self::from_value(&Value::Object(root.clone()))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, value: Value) {
        write_json_atomic(&manifest_path(dir), &value).unwrap();
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ManifestDocument::load(dir.path()),
            Err(BundleError::ManifestNotFound(_))
        ));
    }

    #[test]
    fn test_load_rejects_non_object_root() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), json!(["not", "an", "object"]));
        assert!(matches!(
            ManifestDocument::load(dir.path()),
            Err(BundleError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_register_skill_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), json!({ "name": "demo", "skills": ["skills/a/"] }));

        let mut doc = ManifestDocument::load(dir.path()).unwrap();
        assert!(!doc.register_skill("./skills/a").unwrap());
        assert!(doc.register_skill("./skills/b").unwrap());
        assert!(!doc.register_skill("./skills/b").unwrap());
        doc.save().unwrap();

        let reloaded = ManifestDocument::load(dir.path()).unwrap();
        assert_eq!(reloaded.root["skills"], json!(["skills/a/", "./skills/b"]));
    }

    #[test]
    fn test_save_preserves_unknown_keys_and_order() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            json!({ "name": "demo", "homepage": "https://example.org", "version": "1.0.0" }),
        );

        let mut doc = ManifestDocument::load(dir.path()).unwrap();
        doc.register_skill("./skills/x").unwrap();
        doc.save().unwrap();

        let keys: Vec<_> = ManifestDocument::load(dir.path())
            .unwrap()
            .root
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["name", "homepage", "version", "skills"]);
    }

    #[test]
    fn test_inline_connectors_mut_rejects_path() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), json!({ "mcpServers": "./.mcp.json" }));
        let mut doc = ManifestDocument::load(dir.path()).unwrap();
        assert!(doc.inline_connectors_mut().is_err());
    }
}
