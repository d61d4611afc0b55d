//! CLI command definitions.

use crate::styles::styles;
use crate::{examples, examples_section};
use clap::{Parser, Subcommand};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const CREATE_EXAMPLES: &str = examples![
    "bundle create-bundle my-bundle             " # "Create skills/ and the manifest",
    "bundle create-bundle my-bundle --with-all  " # "Also create commands/, agents/, hooks/, mcp/",
    "bundle create-bundle my-bundle -C ~/bundles" # "Create inside another directory",
];

const ADD_SKILL_EXAMPLES: &str = examples![
    "bundle add-skill-to-bundle my-bundle greeter" # "Add skills/greeter/SKILL.md",
    "bundle add-skill . pdf-filler               " # "Short alias, current bundle",
];

const ADD_MCP_EXAMPLES: &str = examples![
    "bundle add-mcp-to-bundle . db stdio --command db-server" # "Local process connector",
    "bundle add-mcp-to-bundle . fs stdio --command npx --args \"-y @mcp/fs\"" # "With arguments",
    "bundle add-mcp-to-bundle . db stdio --command db --env DB_URL='${DB_URL}'" # "With env vars",
    "bundle add-mcp-to-bundle . api http --url https://api.example.com/mcp" # "Remote connector",
    "bundle add-mcp-to-bundle . api http --url $URL --header Authorization='Bearer ${TOKEN}'" # "With headers",
    "bundle add-mcp-to-bundle . db stdio --inline -y --command db" # "Store in the manifest, no prompts",
];

const VALIDATE_EXAMPLES: &str = examples![
    "bundle validate-bundle .          " # "Validate current directory",
    "bundle validate-bundle ./my-bundle" # "Validate specific path",
    "bundle validate-bundle . --strict " # "Treat warnings as errors",
    "bundle validate-bundle . --json   " # "JSON output for CI/CD",
    "bundle validate-bundle . -q       " # "Quiet mode (errors only)",
];

const CLI_EXAMPLES: &str = concat!(
    examples![
        "bundle create-bundle demo                     " # "Scaffold a bundle",
        "bundle add-skill-to-bundle demo greeter       " # "Add a skill stub",
        "bundle add-mcp-to-bundle demo db stdio        " # "Add a connector (prompts for fields)",
        "bundle validate-bundle demo                   " # "Check the bundle",
    ],
    "\n\n",
    examples_section!["Environment:";
        "RUST_LOG=debug                        " # "Enable debug logging",
        "BUNDLE_CONNECTOR_STORAGE=inline       " # "Store new connectors in the manifest",
        "NO_COLOR=1                            " # "Disable colored output",
    ],
);

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Bundle CLI - scaffold and validate capability bundles.
#[derive(Debug, Parser)]
#[command(name = "bundle", author, version, styles=styles())]
#[command(about = "Scaffold and validate capability bundles", after_help = CLI_EXAMPLES)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new bundle directory with a placeholder manifest.
    #[command(visible_alias = "create", after_help = CREATE_EXAMPLES)]
    CreateBundle {
        /// Bundle name (lowercase letters, digits and hyphens).
        name: String,

        /// Also create commands/, agents/, hooks/ and mcp/.
        #[arg(long)]
        with_all: bool,

        /// Parent directory (defaults to current directory).
        #[arg(short = 'C', long = "dir")]
        dir: Option<String>,
    },

    /// Add a skill stub to an existing bundle.
    #[command(visible_alias = "add-skill", after_help = ADD_SKILL_EXAMPLES)]
    AddSkillToBundle {
        /// Path to the bundle directory.
        bundle_path: String,

        /// Skill name (lowercase letters, digits and hyphens).
        skill_name: String,
    },

    /// Add or replace an MCP server connector.
    #[command(visible_alias = "add-mcp", after_help = ADD_MCP_EXAMPLES)]
    AddMcpToBundle {
        /// Path to the bundle directory.
        bundle_path: String,

        /// Server name (key under `mcpServers`).
        server_name: String,

        /// Transport: stdio or http.
        transport: String,

        /// Command to execute (stdio).
        #[arg(long)]
        command: Option<String>,

        /// Command arguments (space-separated string, stdio).
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,

        /// Environment variables as KEY=VALUE (repeatable, stdio).
        #[arg(long = "env")]
        env: Vec<String>,

        /// Server URL (http).
        #[arg(long)]
        url: Option<String>,

        /// HTTP headers as KEY=VALUE (repeatable, http).
        #[arg(long = "header")]
        headers: Vec<String>,

        /// Store the connector inline in the manifest when the bundle has none yet.
        #[arg(long)]
        inline: bool,

        /// Skip prompts; fail if a required field is missing.
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate a bundle's manifest, skills and connectors.
    #[command(visible_alias = "validate", after_help = VALIDATE_EXAMPLES)]
    ValidateBundle {
        /// Path to the bundle directory (defaults to current directory).
        #[arg(default_value = ".")]
        bundle_path: String,

        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Show only errors, no details.
        #[arg(short, long)]
        quiet: bool,
    },
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_mcp() {
        let cli = Cli::try_parse_from([
            "bundle",
            "add-mcp-to-bundle",
            "demo",
            "db",
            "stdio",
            "--command",
            "db-server",
            "--args",
            "--port 5432",
            "--env",
            "A=1",
            "--env",
            "B=2",
            "-y",
        ])
        .unwrap();

        match cli.command {
            Command::AddMcpToBundle {
                transport,
                args,
                env,
                yes,
                inline,
                ..
            } => {
                assert_eq!(transport, "stdio");
                assert_eq!(args.as_deref(), Some("--port 5432"));
                assert_eq!(env, vec!["A=1", "B=2"]);
                assert!(yes);
                assert!(!inline);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_aliases_and_defaults() {
        let cli = Cli::try_parse_from(["bundle", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::ValidateBundle { ref bundle_path, .. } if bundle_path == "."
        ));

        let cli = Cli::try_parse_from(["bundle", "create", "demo", "--with-all"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::CreateBundle { with_all: true, .. }
        ));

        assert!(Cli::try_parse_from(["bundle", "create-bundle"]).is_err());
    }
}
