//! Non-destructive upsert of connector entries.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::ConnectorStorage;
use crate::constants::MCP_SERVERS_KEY;
use crate::error::{BundleError, BundleResult};
use crate::manifest::{ManifestDocument, json_type_name};
use crate::persist::{read_json, write_json_atomic};
use crate::templates::connector_file_template;

use super::source::{ConnectorSource, external_connector_path, resolve_source};
use super::types::ConnectorSpec;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Where a merged entry ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Storage that received the entry.
    pub storage: ConnectorStorage,
    /// File that was rewritten.
    pub path: PathBuf,
    /// True if an entry with the same name was replaced.
    pub replaced: bool,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Insert or replace a named connector in a bundle.
///
/// The target is the authoritative storage from [`resolve_source`]. A string
/// `mcpServers` never redirects the write: external entries always go to
/// `.mcp.json`. When the bundle has no connectors yet, `preference` decides. Other entries and
/// unrelated keys are left untouched, and the file is replaced atomically.
pub fn merge_entry(
    bundle_dir: &Path,
    name: &str,
    spec: &ConnectorSpec,
    preference: ConnectorStorage,
) -> BundleResult<MergeOutcome> {
    if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
        return Err(BundleError::InvalidName {
            kind: "server",
            name: name.to_string(),
        });
    }

    tracing::debug!(
        server = name,
        transport = %spec.transport(),
        preference = %preference,
        "merging connector"
    );

    let mut document = ManifestDocument::load(bundle_dir)?;
    let manifest = document.typed()?;
    let entry = spec.to_value()?;

    match resolve_source(bundle_dir, &manifest) {
        ConnectorSource::Inline { shadowed } => {
            if let Some(path) = shadowed {
                tracing::warn!(
                    file = %path.display(),
                    "inline connectors take precedence; external file left unchanged"
                );
            }
            merge_inline(&mut document, name, entry)
        }
        ConnectorSource::External { path, .. } => merge_external(&path, name, entry),
        ConnectorSource::Unresolved { reference } => {
            tracing::debug!(
                reference = %reference,
                "`{}` reference has no file; writing the conventional one",
                MCP_SERVERS_KEY
            );
            merge_external(&external_connector_path(bundle_dir), name, entry)
        }
        ConnectorSource::Absent => match preference {
            ConnectorStorage::External => {
                merge_external(&external_connector_path(bundle_dir), name, entry)
            }
            ConnectorStorage::Inline => merge_inline(&mut document, name, entry),
        },
    }
}

/// Upsert into the manifest's inline mapping.
fn merge_inline(
    document: &mut ManifestDocument,
    name: &str,
    entry: Value,
) -> BundleResult<MergeOutcome> {
    let replaced = document
        .inline_connectors_mut()?
        .insert(name.to_string(), entry)
        .is_some();
    document.save()?;

    tracing::info!(server = name, replaced, "merged connector into manifest");
    Ok(MergeOutcome {
        storage: ConnectorStorage::Inline,
        path: document.path.clone(),
        replaced,
    })
}

/// Upsert into an external connector file, creating it if needed.
fn merge_external(path: &Path, name: &str, entry: Value) -> BundleResult<MergeOutcome> {
    let mut root = if path.exists() {
        match read_json(path)? {
            Value::Object(map) => map,
            other => {
                return Err(BundleError::MalformedDocument {
                    path: path.to_path_buf(),
                    message: format!(
                        "connector file root must be an object, found {}",
                        json_type_name(&other)
                    ),
                });
            }
        }
    } else {
        match connector_file_template() {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    };

    let servers = root
        .entry(MCP_SERVERS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(servers) = servers else {
        return Err(BundleError::MalformedDocument {
            path: path.to_path_buf(),
            message: format!("`{}` must be an object", MCP_SERVERS_KEY),
        });
    };

    let replaced = servers.insert(name.to_string(), entry).is_some();
    write_json_atomic(path, &Value::Object(root))?;

    tracing::info!(server = name, replaced, file = %path.display(), "merged connector into file");
    Ok(MergeOutcome {
        storage: ConnectorStorage::External,
        path: path.to_path_buf(),
        replaced,
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::manifest_path;
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn bundle_with(manifest: Value) -> TempDir {
        let dir = TempDir::new().unwrap();
        write_json_atomic(&manifest_path(dir.path()), &manifest).unwrap();
        dir
    }

    fn stdio(command: &str) -> ConnectorSpec {
        ConnectorSpec::Stdio {
            command: command.into(),
            args: vec![],
            env: BTreeMap::new(),
        }
    }

    #[test]
    fn test_upsert_replaces_entry() {
        let dir = bundle_with(json!({ "name": "demo" }));

        let first = merge_entry(dir.path(), "db", &stdio("one"), ConnectorStorage::External).unwrap();
        assert!(!first.replaced);
        let second =
            merge_entry(dir.path(), "db", &stdio("two"), ConnectorStorage::External).unwrap();
        assert!(second.replaced);

        let file = read_json(&dir.path().join(".mcp.json")).unwrap();
        let servers = file["mcpServers"].as_object().unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers["db"]["command"], "two");
    }

    #[test]
    fn test_preference_inline_when_absent() {
        let dir = bundle_with(json!({ "name": "demo", "skills": [] }));

        let outcome =
            merge_entry(dir.path(), "db", &stdio("db"), ConnectorStorage::Inline).unwrap();
        assert_eq!(outcome.storage, ConnectorStorage::Inline);
        assert!(!dir.path().join(".mcp.json").exists());

        let doc = ManifestDocument::load(dir.path()).unwrap();
        assert_eq!(doc.root["mcpServers"]["db"]["command"], "db");
        // Existing keys keep their order.
        let keys: Vec<_> = doc.root.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "skills", "mcpServers"]);
    }

    #[test]
    fn test_existing_external_file_wins_over_preference() {
        let dir = bundle_with(json!({ "name": "demo" }));
        std::fs::write(
            dir.path().join(".mcp.json"),
            r#"{ "mcpServers": { "other": { "command": "x" } }, "extra": true }"#,
        )
        .unwrap();

        let outcome =
            merge_entry(dir.path(), "db", &stdio("db"), ConnectorStorage::Inline).unwrap();
        assert_eq!(outcome.storage, ConnectorStorage::External);

        let file = read_json(&dir.path().join(".mcp.json")).unwrap();
        assert_eq!(file["extra"], json!(true));
        assert_eq!(file["mcpServers"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_inline_is_authoritative_in_conflict() {
        let dir = bundle_with(json!({
            "name": "demo",
            "mcpServers": { "a": { "command": "a" } }
        }));
        std::fs::write(dir.path().join(".mcp.json"), r#"{ "mcpServers": {} }"#).unwrap();

        let outcome =
            merge_entry(dir.path(), "b", &stdio("b"), ConnectorStorage::External).unwrap();
        assert_eq!(outcome.storage, ConnectorStorage::Inline);
        let external = read_json(&dir.path().join(".mcp.json")).unwrap();
        assert_eq!(external, json!({ "mcpServers": {} }));
    }

    #[test]
    fn test_reference_does_not_redirect_writes() {
        let dir = bundle_with(json!({ "name": "demo", "mcpServers": "./config/servers.json" }));
        let api = ConnectorSpec::Http {
            url: "https://example.org/mcp".into(),
            headers: BTreeMap::new(),
        };

        let outcome = merge_entry(dir.path(), "api", &api, ConnectorStorage::Inline).unwrap();
        assert_eq!(outcome.storage, ConnectorStorage::External);
        assert_eq!(outcome.path, dir.path().join(".mcp.json"));
        assert!(!dir.path().join("config/servers.json").exists());

        let file = read_json(&outcome.path).unwrap();
        assert_eq!(file["mcpServers"]["api"]["transport"], "http");

        // The manifest keeps its reference untouched.
        let doc = ManifestDocument::load(dir.path()).unwrap();
        assert_eq!(doc.root["mcpServers"], json!("./config/servers.json"));

        let second = merge_entry(dir.path(), "db", &stdio("db"), ConnectorStorage::Inline).unwrap();
        assert_eq!(second.path, dir.path().join(".mcp.json"));
        let file = read_json(&second.path).unwrap();
        assert_eq!(file["mcpServers"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_bad_names_and_missing_manifest() {
        let dir = bundle_with(json!({ "name": "demo" }));
        assert!(matches!(
            merge_entry(dir.path(), "my server", &stdio("x"), ConnectorStorage::External),
            Err(BundleError::InvalidName { .. })
        ));

        let empty = TempDir::new().unwrap();
        assert!(matches!(
            merge_entry(empty.path(), "db", &stdio("x"), ConnectorStorage::External),
            Err(BundleError::ManifestNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_external_file_is_not_overwritten() {
        let dir = bundle_with(json!({ "name": "demo" }));
        std::fs::write(dir.path().join(".mcp.json"), "{ broken").unwrap();

        assert!(matches!(
            merge_entry(dir.path(), "db", &stdio("x"), ConnectorStorage::External),
            Err(BundleError::MalformedDocument { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".mcp.json")).unwrap(),
            "{ broken"
        );
    }
}
