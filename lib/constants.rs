//! Constants for bundle-cli.
//!
//! On-disk layout of a bundle. Everything else in the crate derives
//! paths from these.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Directory holding the bundle manifest, relative to the bundle root.
pub const MANIFEST_DIR: &str = ".manifest";

/// Manifest file name inside [`MANIFEST_DIR`].
pub const MANIFEST_FILE: &str = "bundle.json";

/// External connector file, relative to the bundle root.
pub const CONNECTOR_FILE: &str = ".mcp.json";

/// Key holding connector definitions, both in the manifest and the external file.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Directory holding skills, relative to the bundle root.
pub const SKILLS_DIR: &str = "skills";

/// Skill descriptor file name inside a skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// Advisory subdirectories created for every new skill.
pub const SKILL_SUBDIRS: &[&str] = &["references", "examples", "scripts"];

/// Directories created for a minimal bundle.
pub const MINIMAL_COMPONENT_DIRS: &[&str] = &[SKILLS_DIR];

/// Directories created for a bundle with `--with-all`.
pub const ALL_COMPONENT_DIRS: &[&str] = &[SKILLS_DIR, "commands", "agents", "hooks", "mcp"];

/// Version written into freshly scaffolded manifests.
pub const INITIAL_VERSION: &str = "0.1.0";

/// Longest accepted bundle or skill name.
pub const MAX_NAME_LEN: usize = 64;

/// Front-matter delimiter line in skill descriptors.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Environment variable selecting the default connector storage.
pub const CONNECTOR_STORAGE_ENV: &str = "BUNDLE_CONNECTOR_STORAGE";

/// Placeholder file kept in otherwise empty scaffolded directories.
pub const KEEP_FILE: &str = ".gitkeep";
