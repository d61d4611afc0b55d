//! Connector merge command handler.

use crate::config::{BundleConfig, ConnectorStorage};
use crate::connector::{ConnectorSpec, Transport, merge_entry};
use crate::error::{BundleError, BundleResult};
use crate::prompt::{ConnectorAnswers, prompt_connector};
use crate::validate::validate_bundle;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use super::validate_cmd::{print_issues, print_summary};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Connector fields passed via CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct ConnectorOptions {
    /// Command to execute (stdio).
    pub command: Option<String>,
    /// Command arguments as one whitespace-separated string.
    pub args: Option<String>,
    /// Environment variables as KEY=VALUE pairs.
    pub env: Vec<String>,
    /// Server URL (http).
    pub url: Option<String>,
    /// HTTP headers as KEY=VALUE pairs.
    pub headers: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ConnectorOptions {
    /// Name of the first field `transport` requires that is not set.
    pub fn missing_field(&self, transport: Transport) -> Option<&'static str> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        match transport {
            Transport::Stdio if !present(&self.command) => Some("command"),
            Transport::Http if !present(&self.url) => Some("url"),
            _ => None,
        }
    }

    /// Flags given for the other transport.
    pub fn foreign_flags(&self, transport: Transport) -> Vec<&'static str> {
        let mut flags = Vec::new();
        match transport {
            Transport::Stdio => {
                if self.url.is_some() {
                    flags.push("--url");
                }
                if !self.headers.is_empty() {
                    flags.push("--header");
                }
            }
            Transport::Http => {
                if self.command.is_some() {
                    flags.push("--command");
                }
                if self.args.is_some() {
                    flags.push("--args");
                }
                if !self.env.is_empty() {
                    flags.push("--env");
                }
            }
        }
        flags
    }

    /// Parse env/headers from KEY=VALUE format into a BTreeMap.
    fn parse_key_values(flag: &str, pairs: &[String]) -> BundleResult<BTreeMap<String, String>> {
        pairs
            .iter()
            .map(|s| match s.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.trim().to_string()))
                }
                _ => Err(BundleError::Generic(format!(
                    "{} expects KEY=VALUE, got `{}`",
                    flag, s
                ))),
            })
            .collect()
    }

    /// Build the connector entry for `transport`.
    pub fn to_spec(&self, transport: Transport) -> BundleResult<ConnectorSpec> {
        if let Some(field) = self.missing_field(transport) {
            return Err(BundleError::MissingConnectorField {
                field,
                transport: transport.to_string(),
            });
        }

        let spec = match transport {
            Transport::Stdio => ConnectorSpec::Stdio {
                command: self.command.clone().unwrap_or_default().trim().to_string(),
                args: self
                    .args
                    .as_deref()
                    .map(|a| a.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
                env: Self::parse_key_values("--env", &self.env)?,
            },
            Transport::Http => ConnectorSpec::Http {
                url: self.url.clone().unwrap_or_default().trim().to_string(),
                headers: Self::parse_key_values("--header", &self.headers)?,
            },
        };
        Ok(spec)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Add or replace a connector, then re-validate the bundle.
pub fn handle_add_mcp(
    bundle_path: String,
    server_name: String,
    transport: String,
    mut options: ConnectorOptions,
    inline: bool,
    yes: bool,
) -> BundleResult<()> {
    let bundle_dir = PathBuf::from(&bundle_path);
    if !bundle_dir.is_dir() {
        return Err(BundleError::PathNotFound(bundle_dir));
    }

    let transport: Transport = transport.parse()?;

    let mut config = BundleConfig::from_env()?;
    if inline {
        config = config.with_connector_storage(ConnectorStorage::Inline);
    }

    if options.missing_field(transport).is_some() && !yes && std::io::stdin().is_terminal() {
        let answers = prompt_connector(
            &server_name,
            transport,
            ConnectorAnswers {
                command: options.command.clone(),
                args: options.args.clone(),
                url: options.url.clone(),
            },
        )?;
        options.command = answers.command;
        options.args = answers.args;
        options.url = answers.url;
    }

    let spec = options.to_spec(transport)?;
    for flag in options.foreign_flags(transport) {
        println!(
            "  {} {} is ignored for {} transport",
            "warning:".bright_yellow().bold(),
            flag,
            transport
        );
    }

    let outcome = merge_entry(&bundle_dir, &server_name, &spec, config.connector_storage)?;

    let target = outcome
        .path
        .strip_prefix(&bundle_dir)
        .unwrap_or(&outcome.path)
        .display()
        .to_string();
    println!(
        "\n  {} {} connector {} ({}) → {}\n",
        "✓".bright_green(),
        if outcome.replaced { "Replaced" } else { "Added" },
        server_name.bold(),
        transport,
        target.bright_cyan()
    );

    let env_vars = spec.required_env_vars();
    if !env_vars.is_empty() {
        println!(
            "  · {}  {}\n",
            "Requires env".dimmed(),
            env_vars.join(", ").bright_white()
        );
    }

    // The merge is kept even if the bundle has problems elsewhere.
    let result = validate_bundle(&bundle_dir);
    if !result.is_strict_valid() {
        print_issues(&result, false);
    }
    print_summary(&result, false);
    println!();

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::read_json;
    use crate::scaffold::create_bundle;
    use tempfile::TempDir;

    #[test]
    fn test_to_spec() {
        let options = ConnectorOptions {
            command: Some("npx".into()),
            args: Some("-y  @mcp/fs  /tmp".into()),
            env: vec!["ROOT=${HOME}".into()],
            ..Default::default()
        };
        let spec = options.to_spec(Transport::Stdio).unwrap();
        assert_eq!(
            spec,
            ConnectorSpec::Stdio {
                command: "npx".into(),
                args: vec!["-y".into(), "@mcp/fs".into(), "/tmp".into()],
                env: BTreeMap::from([("ROOT".to_string(), "${HOME}".to_string())]),
            }
        );

        assert!(matches!(
            options.to_spec(Transport::Http),
            Err(BundleError::MissingConnectorField { field: "url", .. })
        ));
        assert_eq!(options.foreign_flags(Transport::Http), vec!["--command", "--args", "--env"]);
    }

    #[test]
    fn test_bad_key_value() {
        let options = ConnectorOptions {
            url: Some("https://x.org".into()),
            headers: vec!["Authorization".into()],
            ..Default::default()
        };
        assert!(matches!(
            options.to_spec(Transport::Http),
            Err(BundleError::Generic(_))
        ));
    }

    #[test]
    fn test_handle_add_mcp_non_interactive() {
        let parent = TempDir::new().unwrap();
        let bundle = create_bundle(parent.path(), "demo", false).unwrap();
        let path = bundle.display().to_string();

        let err = handle_add_mcp(
            path.clone(),
            "db".into(),
            "stdio".into(),
            ConnectorOptions::default(),
            false,
            true,
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::MissingConnectorField { field: "command", .. }));

        let err = handle_add_mcp(
            path.clone(),
            "db".into(),
            "stido".into(),
            ConnectorOptions::default(),
            false,
            true,
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::InvalidTransport { .. }));

        handle_add_mcp(
            path,
            "db".into(),
            "stdio".into(),
            ConnectorOptions {
                command: Some("db-server".into()),
                ..Default::default()
            },
            true,
            true,
        )
        .unwrap();

        let manifest = read_json(&bundle.join(".manifest/bundle.json")).unwrap();
        assert_eq!(manifest["mcpServers"]["db"]["command"], "db-server");
        assert!(!bundle.join(".mcp.json").exists());
    }
}
