//! `bundle` is the primary CLI binary.

use bundle_cli::handlers::{self, ConnectorOptions};
use bundle_cli::{BundleError, BundleResult, Cli, Command};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    init_tracing();

    if let Err(e) = run() {
        // The report has already been printed.
        if !matches!(e, BundleError::ValidationFailed { .. }) {
            print_error(&e);
        }
        std::process::exit(1);
    }
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &BundleError) {
    println!();
    match e {
        BundleError::ManifestNotFound(path) => {
            println!("  {} bundle manifest not found", "error".bright_red().bold());
            println!();
            println!("    {}: {}", "Searched".dimmed(), path.display());
            println!();
            println!(
                "    {}: Run {} to create a bundle",
                "hint".bright_blue().bold(),
                "bundle create-bundle".bright_white()
            );
        }
        BundleError::MalformedDocument { path, message } => {
            println!("  {} Malformed document", "error".bright_red().bold());
            println!();
            println!("    {}: {}", "File".dimmed(), path.display());
            println!("    {}", message);
        }
        BundleError::InvalidTransport {
            transport,
            suggestion,
        } => {
            println!(
                "  {} Invalid transport '{}'",
                "error".bright_red().bold(),
                transport.bright_white()
            );
            println!();
            match suggestion {
                Some(s) => println!(
                    "    {}: did you mean {}?",
                    "hint".bright_blue().bold(),
                    s.bright_white()
                ),
                None => println!(
                    "    {}: use {} or {}",
                    "hint".bright_blue().bold(),
                    "stdio".bright_white(),
                    "http".bright_white()
                ),
            }
        }
        BundleError::MissingConnectorField { field, transport } => {
            println!(
                "  {} Missing `{}` for {} connector",
                "error".bright_red().bold(),
                field,
                transport
            );
            println!();
            println!(
                "    {}: pass {} or run without {} to be prompted",
                "hint".bright_blue().bold(),
                format!("--{}", field).bright_white(),
                "--yes".bright_white()
            );
        }
        BundleError::AlreadyExists(path) | BundleError::SkillAlreadyExists(path) => {
            println!(
                "  {} {} already exists",
                "error".bright_red().bold(),
                path.display().to_string().bright_white()
            );
        }
        BundleError::InvalidName { kind, name } => {
            println!(
                "  {} Invalid {} name '{}'",
                "error".bright_red().bold(),
                kind,
                name.bright_white()
            );
            println!();
            println!(
                "    {}: use lowercase letters, digits and hyphens (e.g. {})",
                "hint".bright_blue().bold(),
                "my-bundle".bright_white()
            );
        }
        BundleError::Cancelled => {
            println!("  {} Operation cancelled", "✗".bright_red());
        }
        // For all other errors, use a consistent styled format
        _ => {
            let msg = e.to_string();
            match msg.split_once(": ") {
                Some((prefix, rest)) if prefix.ends_with("error") => {
                    println!(
                        "  {} {}",
                        format!("error[{}]", prefix.to_lowercase().replace(" error", ""))
                            .bright_red()
                            .bold(),
                        rest.dimmed()
                    );
                }
                _ => println!("  {} {}", "error".bright_red().bold(), msg),
            }
        }
    }
    println!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> BundleResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::CreateBundle {
            name,
            with_all,
            dir,
        } => handlers::handle_create_bundle(name, with_all, dir),
        Command::AddSkillToBundle {
            bundle_path,
            skill_name,
        } => handlers::handle_add_skill(bundle_path, skill_name),
        Command::AddMcpToBundle {
            bundle_path,
            server_name,
            transport,
            command,
            args,
            env,
            url,
            headers,
            inline,
            yes,
        } => handlers::handle_add_mcp(
            bundle_path,
            server_name,
            transport,
            ConnectorOptions {
                command,
                args,
                env,
                url,
                headers,
            },
            inline,
            yes,
        ),
        Command::ValidateBundle {
            bundle_path,
            strict,
            json,
            quiet,
        } => handlers::handle_validate_bundle(bundle_path, strict, json, quiet),
    }
}
