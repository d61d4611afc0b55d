//! JSON document persistence with atomic writes.
//!
//! Every write goes to a temporary file in the destination directory and is
//! renamed over the original, so readers observe either the old or the new
//! document and never a partial one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::error::{BundleError, BundleResult};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Read and parse a JSON document.
///
/// Parse failures become [`BundleError::MalformedDocument`]; a missing file is
/// [`BundleError::PathNotFound`].
pub fn read_json(path: &Path) -> BundleResult<Value> {
    if !path.exists() {
        return Err(BundleError::PathNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    parse_json(path, &content)
}

/// Parse JSON content read from `path`.
pub fn parse_json(path: &Path, content: &str) -> BundleResult<Value> {
    serde_json::from_str(content).map_err(|e| BundleError::MalformedDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize a JSON value and write it atomically.
pub fn write_json_atomic(path: &Path, value: &Value) -> BundleResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    write_atomic(path, content.as_bytes())
}

/// Write bytes atomically (temp file in the same directory + rename).
pub fn write_atomic(path: &Path, content: &[u8]) -> BundleResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let temp_path = temp_path_for(&parent, path);

    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(BundleError::Io(e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BundleError::Io(e)
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Unique sibling temp path so concurrent writers never share a temp file.
fn temp_path_for(parent: &Path, path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".into());
    parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/doc.json");
        let value = serde_json::json!({ "b": 1, "a": [true] });

        write_json_atomic(&path, &value).unwrap();

        assert_eq!(read_json(&path).unwrap(), value);
        // Key order is preserved.
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.find("\"b\"").unwrap() < content.find("\"a\"").unwrap());
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        write_json_atomic(&path, &serde_json::json!({})).unwrap();
        write_json_atomic(&path, &serde_json::json!({ "x": 1 })).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["doc.json".to_string()]);
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let target = dir.path().join("doc.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "").unwrap();

        assert!(matches!(
            write_json_atomic(&target, &serde_json::json!({})),
            Err(BundleError::Io(_))
        ));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["doc.json".to_string()]);
    }

    #[test]
    fn test_read_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_json(&missing),
            Err(BundleError::PathNotFound(_))
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ nope").unwrap();
        assert!(matches!(
            read_json(&broken),
            Err(BundleError::MalformedDocument { .. })
        ));
    }
}
