//! Role conversion command implementation

use std::path::Path;

use colored::Colorize;

use mirror_tools::frontmatter::convert_dir;

use crate::error::Result;

/// Run the convert-roles command.
pub fn run_convert_roles(source: &Path, out: &Path) -> Result<()> {
    println!(
        "{} Converting roles from {}",
        "=>".blue().bold(),
        source.display().to_string().cyan()
    );

    let report = convert_dir(source, out)?;

    for slug in &report.converted {
        println!("   {} {}", "+".green(), slug);
    }
    for slug in &report.skipped {
        println!("   {} {} (already exists - manual merge required)", "-".yellow(), slug);
    }
    for (slug, reason) in &report.failures {
        println!("   {} {}: {}", "!".red(), slug.cyan(), reason);
    }

    println!();
    println!(
        "{} Converted {}, skipped {}, failed {}. Output in {}.",
        "OK".green().bold(),
        report.converted.len(),
        report.skipped.len(),
        report.failures.len(),
        out.display().to_string().cyan()
    );

    Ok(())
}
