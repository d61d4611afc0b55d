//! Bundle and skill scaffolding.
//!
//! Both operations are fail-fast: the first blocking condition aborts before
//! anything is written.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::{
    ALL_COMPONENT_DIRS, KEEP_FILE, MANIFEST_DIR, MINIMAL_COMPONENT_DIRS, SKILL_SUBDIRS, SKILLS_DIR,
};
use crate::error::{BundleError, BundleResult};
use crate::manifest::{ManifestDocument, manifest_path};
use crate::persist::write_json_atomic;
use crate::skill::descriptor_path;
use crate::templates::{bundle_template, component_readme, skill_template};
use crate::validate::is_valid_bundle_name;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Create a new bundle directory under `parent`.
///
/// Writes a manifest filled with placeholders and the `skills/` directory,
/// or every component directory when `with_all` is set.
pub fn create_bundle(parent: &Path, name: &str, with_all: bool) -> BundleResult<PathBuf> {
    if !is_valid_bundle_name(name) {
        return Err(BundleError::InvalidName {
            kind: "bundle",
            name: name.to_string(),
        });
    }

    if !parent.is_dir() {
        return Err(BundleError::PathNotFound(parent.to_path_buf()));
    }

    let bundle_dir = parent.join(name);
    create_new_dir(&bundle_dir, BundleError::AlreadyExists)?;

    let template = bundle_template(name, with_all);
    fs::create_dir_all(bundle_dir.join(MANIFEST_DIR))?;
    write_json_atomic(&manifest_path(&bundle_dir), &template.manifest)?;
    fs::write(bundle_dir.join("README.md"), &template.readme)?;

    let dirs = if with_all {
        ALL_COMPONENT_DIRS
    } else {
        MINIMAL_COMPONENT_DIRS
    };
    for dir in dirs {
        let path = bundle_dir.join(dir);
        fs::create_dir_all(&path)?;
        fs::write(path.join(KEEP_FILE), "")?;
        if let Some(readme) = component_readme(dir) {
            fs::write(path.join("README.md"), readme)?;
        }
    }

    tracing::info!(bundle = %bundle_dir.display(), with_all, "created bundle");
    Ok(bundle_dir)
}

/// Add a skill stub to an existing bundle and register it in the manifest.
///
/// The bundle only needs a manifest file; it is not validated.
pub fn add_skill(bundle_dir: &Path, skill_name: &str) -> BundleResult<PathBuf> {
    if !bundle_dir.is_dir() {
        return Err(BundleError::PathNotFound(bundle_dir.to_path_buf()));
    }

    if !is_valid_bundle_name(skill_name) {
        return Err(BundleError::InvalidName {
            kind: "skill",
            name: skill_name.to_string(),
        });
    }

    // A broken manifest must fail before anything is created.
    let mut document = ManifestDocument::load(bundle_dir)?;
    let entry = format!("./{}/{}", SKILLS_DIR, skill_name);
    let registered = document.register_skill(&entry)?;

    let skill_dir = bundle_dir.join(SKILLS_DIR).join(skill_name);
    if skill_dir.exists() {
        return Err(BundleError::SkillAlreadyExists(skill_dir));
    }

    fs::create_dir_all(bundle_dir.join(SKILLS_DIR))?;
    create_new_dir(&skill_dir, BundleError::SkillAlreadyExists)?;
    fs::write(descriptor_path(&skill_dir), skill_template(skill_name))?;

    for sub in SKILL_SUBDIRS {
        let path = skill_dir.join(sub);
        fs::create_dir(&path)?;
        fs::write(path.join(KEEP_FILE), "")?;
    }

    if registered {
        document.save()?;
    }

    tracing::info!(skill = skill_name, registered, "added skill");
    Ok(skill_dir)
}

/// Create a directory that must not exist yet.
fn create_new_dir(path: &Path, exists: fn(PathBuf) -> BundleError) -> BundleResult<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(exists(path.to_path_buf())),
        Err(e) => Err(e.into()),
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

    #[test]
    fn test_create_minimal_bundle() {
        let parent = TempDir::new().unwrap();
        let dir = create_bundle(parent.path(), "demo", false).unwrap();

        assert_eq!(dir, parent.path().join("demo"));
        assert!(dir.join(".manifest/bundle.json").is_file());
        assert!(dir.join("skills/.gitkeep").is_file());
        assert!(!dir.join("commands").exists());

        let doc = ManifestDocument::load(&dir).unwrap();
        assert_eq!(doc.root["skills"], json!([]));
        assert_eq!(doc.root["name"], "demo");
    }

    #[test]
    fn test_create_full_bundle() {
        let parent = TempDir::new().unwrap();
        let dir = create_bundle(parent.path(), "demo", true).unwrap();

        for sub in ["skills", "commands", "agents", "hooks", "mcp"] {
            assert!(dir.join(sub).is_dir(), "{} missing", sub);
        }
        assert!(dir.join("commands/README.md").is_file());
        let doc = ManifestDocument::load(&dir).unwrap();
        assert_eq!(doc.root["commands"], json!([]));
    }

    #[test]
    fn test_create_fails_fast() {
        let parent = TempDir::new().unwrap();
        create_bundle(parent.path(), "demo", false).unwrap();

        assert!(matches!(
            create_bundle(parent.path(), "demo", false),
            Err(BundleError::AlreadyExists(_))
        ));
        assert!(matches!(
            create_bundle(parent.path(), "", false),
            Err(BundleError::InvalidName { .. })
        ));
        assert!(matches!(
            create_bundle(parent.path(), "../escape", false),
            Err(BundleError::InvalidName { .. })
        ));
        assert!(matches!(
            create_bundle(&parent.path().join("missing"), "demo", false),
            Err(BundleError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_add_skill() {
        let parent = TempDir::new().unwrap();
        let bundle = create_bundle(parent.path(), "demo", false).unwrap();

        let skill = add_skill(&bundle, "greeter").unwrap();
        assert_eq!(skill, bundle.join("skills/greeter"));

        let descriptor = fs::read_to_string(skill.join("SKILL.md")).unwrap();
        assert!(descriptor.starts_with("---\nname: greeter\n"));
        for sub in ["references", "examples", "scripts"] {
            assert!(skill.join(sub).join(".gitkeep").is_file());
        }

        let doc = ManifestDocument::load(&bundle).unwrap();
        assert_eq!(doc.root["skills"], json!(["./skills/greeter"]));
    }

    #[test]
    fn test_add_skill_errors() {
        let parent = TempDir::new().unwrap();
        assert!(matches!(
            add_skill(&parent.path().join("nope"), "greeter"),
            Err(BundleError::PathNotFound(_))
        ));
        assert!(matches!(
            add_skill(parent.path(), "greeter"),
            Err(BundleError::ManifestNotFound(_))
        ));

        let bundle = create_bundle(parent.path(), "demo", false).unwrap();
        add_skill(&bundle, "greeter").unwrap();
        assert!(matches!(
            add_skill(&bundle, "greeter"),
            Err(BundleError::SkillAlreadyExists(_))
        ));
        assert!(matches!(
            add_skill(&bundle, "Bad Name"),
            Err(BundleError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_add_skill_with_malformed_manifest_creates_nothing() {
        let parent = TempDir::new().unwrap();
        let bundle = create_bundle(parent.path(), "demo", false).unwrap();
        fs::write(bundle.join(".manifest/bundle.json"), "{ broken").unwrap();

        assert!(matches!(
            add_skill(&bundle, "greeter"),
            Err(BundleError::MalformedDocument { .. })
        ));
        assert!(!bundle.join("skills/greeter").exists());
    }

    #[test]
    fn test_existing_directory_is_registered_once() {
        let parent = TempDir::new().unwrap();
        let bundle = create_bundle(parent.path(), "demo", false).unwrap();
        fs::create_dir_all(bundle.join("skills/greeter")).unwrap();

        assert!(add_skill(&bundle, "greeter").is_err());
        // Nothing was saved for the failed attempt.
        let doc = ManifestDocument::load(&bundle).unwrap();
        assert_eq!(doc.root["skills"], json!([]));
    }
}
