//! Interactive CLI prompts for `bundle add-mcp-to-bundle`.
//!
//! Uses cliclack with a custom theme.

use std::sync::atomic::{AtomicBool, Ordering};

use cliclack::{Theme, ThemeState, input, intro, outro, set_theme};
use console::{Style, Term};

use crate::connector::Transport;
use crate::error::{BundleError, BundleResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static CTRLC_HANDLER_SET: AtomicBool = AtomicBool::new(false);

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Prompt theme with a teal accent.
pub struct BundleTheme;

/// Connector fields collected from flags, prompts, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorAnswers {
    pub command: Option<String>,
    pub args: Option<String>,
    pub url: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Theme for BundleTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().color256(37),
            ThemeState::Error(_) => Style::new().red(),
            _ => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active | ThemeState::Submit => Style::new().color256(37),
            ThemeState::Error(_) => Style::new().red(),
            _ => Style::new().dim(),
        }
    }

    fn input_style(&self, _state: &ThemeState) -> Style {
        Style::new()
    }

    fn placeholder_style(&self, _state: &ThemeState) -> Style {
        Style::new().dim()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Initialize the theme for cliclack prompts and set up Ctrl+C handler.
pub fn init_theme() {
    set_theme(BundleTheme);

    // Only once per process.
    if !CTRLC_HANDLER_SET.swap(true, Ordering::SeqCst) {
        let _ = ctrlc::set_handler(|| {
            let term = Term::stderr();
            let _ = term.show_cursor();
            std::process::exit(130);
        });
    }
}

/// Check if an error indicates the user cancelled (ESC or Ctrl+C).
fn is_cancelled(e: &std::io::Error) -> bool {
    e.kind() == std::io::ErrorKind::Interrupted
}

/// Convert IO interrupted errors to Cancelled for clean exit on ESC.
fn map_cancelled<T>(result: Result<T, std::io::Error>) -> BundleResult<T> {
    result.map_err(|e| {
        if is_cancelled(&e) {
            BundleError::Cancelled
        } else {
            BundleError::Io(e)
        }
    })
}

/// Prompt for the connector fields that were not given as flags.
///
/// Only the fields required by `transport` are asked for; `args` is offered
/// as optional for stdio.
pub fn prompt_connector(
    server_name: &str,
    transport: Transport,
    prefill: ConnectorAnswers,
) -> BundleResult<ConnectorAnswers> {
    init_theme();
    map_cancelled(intro(format!("bundle add-mcp-to-bundle · {}", server_name)))?;

    let mut answers = prefill;
    match transport {
        Transport::Stdio => {
            if answers.command.is_none() {
                let command: String = map_cancelled(
                    input("Command")
                        .placeholder("npx")
                        .validate(|input: &String| {
                            if input.trim().is_empty() {
                                Err("Command is required")
                            } else {
                                Ok(())
                            }
                        })
                        .interact(),
                )?;
                answers.command = Some(command.trim().to_string());

                if answers.args.is_none() {
                    let args: String = map_cancelled(
                        input("Arguments (optional)")
                            .placeholder("-y @scope/server")
                            .required(false)
                            .interact(),
                    )?;
                    answers.args = Some(args).filter(|a| !a.trim().is_empty());
                }
            }
        }
        Transport::Http => {
            if answers.url.is_none() {
                let url: String = map_cancelled(
                    input("Server URL")
                        .placeholder("https://api.example.com/mcp")
                        .validate(|input: &String| {
                            let input = input.trim();
                            if input.is_empty() {
                                Err("URL is required")
                            } else if !(input.starts_with("http://")
                                || input.starts_with("https://")
                                || input.starts_with("${"))
                            {
                                Err("URL must start with http:// or https://")
                            } else {
                                Ok(())
                            }
                        })
                        .interact(),
                )?;
                answers.url = Some(url.trim().to_string());
            }
        }
    }

    map_cancelled(outro("Connector configured"))?;
    Ok(answers)
}
