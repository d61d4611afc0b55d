//! Bundle validation command handler.

use crate::error::{BundleError, BundleResult};
use crate::validate::{ValidationIssue, ValidationResult, manifest_file, validate_bundle};
use colored::Colorize;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a bundle and print the report.
///
/// Exits non-zero (via [`BundleError::ValidationFailed`]) when there is at
/// least one error, or at least one finding with `strict`.
pub fn handle_validate_bundle(
    bundle_path: String,
    strict: bool,
    json_output: bool,
    quiet: bool,
) -> BundleResult<()> {
    let dir = PathBuf::from(bundle_path);
    let result = validate_bundle(&dir);

    if json_output {
        output_json(&result, &dir)?;
        return check_exit_status(&result, strict);
    }

    if quiet {
        output_quiet(&result);
    } else {
        output_full(&result, strict, &dir);
    }

    check_exit_status(&result, strict)
}

/// Output validation result as JSON.
fn output_json(result: &ValidationResult, dir: &Path) -> BundleResult<()> {
    let output = serde_json::json!({
        "bundle": dir.display().to_string(),
        "manifest": manifest_file(),
        "valid": result.is_valid(),
        "strict_valid": result.is_strict_valid(),
        "errors": result.errors,
        "warnings": result.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Output validation result in quiet mode.
fn output_quiet(result: &ValidationResult) {
    for error in &result.errors {
        println!(
            "  {}: {}: {}",
            format!("error[{}]", error.code).bright_red(),
            error.message,
            error.details
        );
    }
}

/// Output validation result in full format.
fn output_full(result: &ValidationResult, strict: bool, dir: &Path) {
    println!(
        "  Validating {} ({})\n",
        dir.display().to_string().bold(),
        manifest_file().dimmed()
    );

    print_issues(result, strict);
    print_summary(result, strict);
}

/// Print every finding, errors first.
///
/// With `strict`, warnings are labelled as errors.
pub(crate) fn print_issues(result: &ValidationResult, strict: bool) {
    for issue in &result.errors {
        print_issue("error", issue);
    }
    for issue in &result.warnings {
        print_issue(if strict { "error" } else { "warning" }, issue);
    }
}

fn print_issue(severity: &str, issue: &ValidationIssue) {
    let label = if severity == "error" {
        format!("error[{}]", issue.code).bright_red().bold()
    } else {
        format!("warning[{}]", issue.code).bright_yellow().bold()
    };
    println!("  {}: {} → {}", label, issue.message, issue.location.bold());

    if let Some(help) = &issue.help {
        println!("      {} {}", "├─".dimmed(), issue.details.dimmed());
        println!(
            "      {} {}: {}",
            "└─".dimmed(),
            "help".bright_green().dimmed(),
            help.dimmed()
        );
    } else {
        println!("      {} {}", "└─".dimmed(), issue.details.dimmed());
    }

    println!();
}

/// Print the one-line summary.
pub(crate) fn print_summary(result: &ValidationResult, strict: bool) {
    let error_count = result.errors.len();
    let warning_count = result.warnings.len();

    if strict {
        let total = error_count + warning_count;
        if total > 0 {
            println!(
                "  {} {} (strict mode)",
                "✗".bright_red(),
                plural(total, "error")
            );
        } else {
            println!("  {} valid", "✓".bright_green());
        }
    } else if error_count > 0 {
        let summary = if warning_count > 0 {
            format!(
                "{}, {}",
                plural(error_count, "error"),
                plural(warning_count, "warning")
            )
        } else {
            plural(error_count, "error")
        };
        println!("  {} {}", "✗".bright_red(), summary);
    } else if warning_count > 0 {
        println!(
            "  {} valid ({})",
            "✓".bright_green(),
            plural(warning_count, "warning")
        );
    } else {
        println!("  {} valid", "✓".bright_green());
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Map the report to the process exit status.
fn check_exit_status(result: &ValidationResult, strict: bool) -> BundleResult<()> {
    let blocking = if strict {
        result.errors.len() + result.warnings.len()
    } else {
        result.errors.len()
    };

    if blocking > 0 {
        return Err(BundleError::ValidationFailed { errors: blocking });
    }
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::create_bundle;
    use tempfile::TempDir;

    #[test]
    fn test_exit_status() {
        let parent = TempDir::new().unwrap();
        let bundle = create_bundle(parent.path(), "demo", false).unwrap();
        let path = bundle.display().to_string();

        // Placeholders are warnings only.
        assert!(handle_validate_bundle(path.clone(), false, true, false).is_ok());
        assert!(matches!(
            handle_validate_bundle(path, true, true, false),
            Err(BundleError::ValidationFailed { errors: 3 })
        ));

        let missing = parent.path().join("nope").display().to_string();
        assert!(matches!(
            handle_validate_bundle(missing, false, false, true),
            Err(BundleError::ValidationFailed { errors: 1 })
        ));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "error"), "1 error");
        assert_eq!(plural(3, "warning"), "3 warnings");
    }
}
