//! Skeleton documents written by the scaffolder.
//!
//! Every human-facing value is a placeholder from [`crate::placeholder`];
//! nothing is inferred from the environment.

use serde_json::{Value, json};

use crate::constants::{INITIAL_VERSION, MCP_SERVERS_KEY};
use crate::placeholder::{
    AUTHOR_EMAIL_PLACEHOLDER, AUTHOR_NAME_PLACEHOLDER, BUNDLE_DESCRIPTION_PLACEHOLDER,
    SKILL_DESCRIPTION_PLACEHOLDER,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Files for a new bundle.
pub struct BundleTemplate {
    /// Content for `.manifest/bundle.json`
    pub manifest: Value,
    /// Content for README.md
    pub readme: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Generate the files for a new bundle.
pub fn bundle_template(name: &str, with_all: bool) -> BundleTemplate {
    BundleTemplate {
        manifest: manifest_template(name, with_all),
        readme: readme_template(name),
    }
}

/// Manifest with placeholder metadata and empty component lists.
pub fn manifest_template(name: &str, with_all: bool) -> Value {
    let mut manifest = json!({
        "name": name,
        "version": INITIAL_VERSION,
        "description": BUNDLE_DESCRIPTION_PLACEHOLDER,
        "author": {
            "name": AUTHOR_NAME_PLACEHOLDER,
            "email": AUTHOR_EMAIL_PLACEHOLDER
        },
        "skills": []
    });

    if with_all && let Value::Object(map) = &mut manifest {
        map.insert("commands".into(), json!([]));
        map.insert("agents".into(), json!([]));
    }

    manifest
}

/// Skill descriptor stub with front matter.
pub fn skill_template(skill_name: &str) -> String {
    let title = title_case(skill_name);
    format!(
        r#"---
name: {skill_name}
description: "{SKILL_DESCRIPTION_PLACEHOLDER}"
---

# {title}

TODO: Explain step by step how to apply this skill.

## Resources

- `references/` holds background material loaded on demand.
- `examples/` holds worked examples.
- `scripts/` holds helper scripts the skill can run.
"#
    )
}

/// Empty external connector file.
pub fn connector_file_template() -> Value {
    json!({ MCP_SERVERS_KEY: {} })
}

/// Note placed in a component directory created by `--with-all`.
pub fn component_readme(dir: &str) -> Option<&'static str> {
    match dir {
        "commands" => Some(COMMANDS_README),
        "agents" => Some(AGENTS_README),
        _ => None,
    }
}

/// Bundle README.
pub fn readme_template(name: &str) -> String {
    format!(
        r#"# {name}

TODO: Describe what this bundle provides.

## Layout

- `.manifest/bundle.json` declares the bundle and its components.
- `skills/` holds one directory per skill, each with a `SKILL.md`.

## Development

```sh
bundle add-skill-to-bundle . my-skill
bundle add-mcp-to-bundle . my-server stdio --command my-server
bundle validate-bundle .
```
"#
    )
}

/// `my-skill` -> `My Skill`.
fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const COMMANDS_README: &str = r#"# Commands

Add one Markdown file per command and list it in `commands` in
`.manifest/bundle.json`, e.g. `"./commands/deploy.md"`.
"#;

const AGENTS_README: &str = r#"# Agents

Add one Markdown file per agent and list it in `agents` in
`.manifest/bundle.json`, e.g. `"./agents/reviewer.md"`.
"#;

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::Placeholder;
    use crate::skill::parse_front_matter;

    #[test]
    fn test_manifest_template() {
        let minimal = manifest_template("demo", false);
        assert_eq!(minimal["name"], "demo");
        assert_eq!(minimal["version"], "0.1.0");
        assert_eq!(minimal["skills"], json!([]));
        assert!(minimal.get("commands").is_none());

        let keys: Vec<_> = minimal.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "version", "description", "author", "skills"]);

        let full = manifest_template("demo", true);
        assert_eq!(full["commands"], json!([]));
        assert_eq!(full["agents"], json!([]));
    }

    #[test]
    fn test_skill_template_front_matter() {
        let content = skill_template("greeter");
        assert!(content.contains("name: greeter\n"));

        let fm = parse_front_matter(&content).unwrap();
        assert_eq!(fm.name.as_present().map(String::as_str), Some("greeter"));
        let description = fm.description.as_present().unwrap();
        assert_eq!(Placeholder::detect(description), Some(Placeholder::Todo));
        assert!(fm.version.is_missing());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("greeter"), "Greeter");
        assert_eq!(title_case("pdf-form-filler"), "Pdf Form Filler");
    }

    #[test]
    fn test_connector_file_template() {
        assert_eq!(connector_file_template(), json!({ "mcpServers": {} }));
    }
}
