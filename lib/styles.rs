//! CLI styles for clap.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};

//--------------------------------------------------------------------------------------------------
// Macros
//--------------------------------------------------------------------------------------------------

/// Build an `Examples:` help section at compile time.
///
/// ```
/// const HELP: &str = bundle_cli::examples![
///     "bundle validate-bundle ." # "Validate current directory",
/// ];
/// assert!(HELP.contains("Validate current directory"));
/// ```
#[macro_export]
macro_rules! examples {
    [$($cmd:literal # $desc:literal),* $(,)?] => {
        concat!(
            "\x1b[1;33mExamples:\x1b[0m",
            $("\n  \x1b[36m", $cmd, "\x1b[0m  ", $desc),*
        )
    };
}

/// Build a titled help section of command/description rows.
#[macro_export]
macro_rules! examples_section {
    [$title:literal; $($cmd:literal # $desc:literal),* $(,)?] => {
        concat!(
            "\x1b[1;33m", $title, "\x1b[0m",
            $("\n  \x1b[36m", $cmd, "\x1b[0m  ", $desc),*
        )
    };
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Help output colors: yellow headers, green usage, cyan literals.
pub fn styles() -> Styles {
    Styles::styled()
        .header(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .usage(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
