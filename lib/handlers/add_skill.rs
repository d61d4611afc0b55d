//! Skill creation command handler.

use crate::constants::SKILL_SUBDIRS;
use crate::error::BundleResult;
use crate::scaffold::add_skill;
use crate::skill::descriptor_path;
use colored::Colorize;
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Add a skill stub to a bundle.
pub fn handle_add_skill(bundle_path: String, skill_name: String) -> BundleResult<()> {
    let bundle_dir = PathBuf::from(&bundle_path);
    let skill_dir = add_skill(&bundle_dir, &skill_name)?;

    let descriptor = descriptor_path(&skill_dir);
    let shown = descriptor
        .strip_prefix(&bundle_dir)
        .unwrap_or(&descriptor)
        .display()
        .to_string();

    println!(
        "\n  {} Added skill {} to {}\n",
        "✓".bright_green(),
        skill_name.bold(),
        bundle_path.bold()
    );
    println!("  · {}  {}", "Descriptor".dimmed(), shown.bright_cyan());
    let folders = SKILL_SUBDIRS
        .iter()
        .map(|d| format!("{}/", d))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  · {}  {}", "Folders".dimmed(), folders);
    println!(
        "\n  Replace the {} description in the front matter, then run {}\n",
        "TODO".bright_yellow(),
        format!("bundle validate-bundle {}", bundle_path).bright_white()
    );
    Ok(())
}
