//! Catalog regeneration command implementation

use std::path::Path;

use colored::Colorize;

use mirror_tools::catalog::update_catalog;

use crate::error::Result;

/// Run the update-catalog command.
pub fn run_update_catalog(catalog: &Path, agents_dir: &Path, commands_dir: &Path) -> Result<()> {
    println!(
        "{} Updating catalog {}",
        "=>".blue().bold(),
        catalog.display().to_string().cyan()
    );

    let update = update_catalog(catalog, agents_dir, commands_dir)?;

    println!("{} Catalog updated:", "OK".green().bold());
    println!("   {} version {}", "+".green(), update.version);
    println!("   {} {} agents", "+".green(), update.agents.len());
    println!("   {} {} commands", "+".green(), update.commands.len());

    Ok(())
}
