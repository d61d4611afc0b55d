//! Bundle creation command handler.

use crate::constants::{ALL_COMPONENT_DIRS, MINIMAL_COMPONENT_DIRS};
use crate::error::BundleResult;
use crate::scaffold::create_bundle;
use crate::validate::manifest_file;
use colored::Colorize;
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Create a new bundle in `dir` (or the current directory).
pub fn handle_create_bundle(name: String, with_all: bool, dir: Option<String>) -> BundleResult<()> {
    let parent = match dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };

    let bundle_dir = create_bundle(&parent, &name, with_all)?;

    println!("\n  {} Created bundle {}\n", "✓".bright_green(), name.bold());
    println!(
        "  · {}  {}",
        "Path".dimmed(),
        bundle_dir.display().to_string().bright_cyan()
    );
    println!("  · {}  {}", "Manifest".dimmed(), manifest_file());

    let dirs = if with_all {
        ALL_COMPONENT_DIRS
    } else {
        MINIMAL_COMPONENT_DIRS
    };
    let dirs = dirs
        .iter()
        .map(|d| format!("{}/", d))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  · {}  {}", "Dirs".dimmed(), dirs);

    print_next_steps(&name);
    Ok(())
}

fn print_next_steps(name: &str) {
    println!("\n  {}:", "Next steps".bold());
    println!(
        "  1. Fill in the {} placeholders in {}",
        "TODO".bright_yellow(),
        manifest_file()
    );
    println!(
        "  2. {}",
        format!("bundle add-skill-to-bundle {} my-skill", name).bright_white()
    );
    println!(
        "  3. {}\n",
        format!("bundle validate-bundle {}", name).bright_white()
    );
}
