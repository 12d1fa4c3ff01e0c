//! Link checker command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;

use mirror_tools::links::check_file;

use crate::error::{CliError, Result};

/// Run the check-links command.
///
/// With no explicit paths, checks every `*.md` file at the top level of the
/// current directory. Exits non-zero when broken links exist.
pub fn run_check_links(paths: &[PathBuf]) -> Result<()> {
    let files = if paths.is_empty() {
        markdown_files_in(Path::new("."))?
    } else {
        paths.to_vec()
    };

    println!("{} Checking documentation links...", "=>".blue().bold());

    let mut total = 0;
    for file in &files {
        let broken = check_file(file)?;
        if broken.is_empty() {
            println!("   {} {}", "OK".green().bold(), file.display());
        } else {
            println!(
                "   {} {} ({} broken)",
                "!".red(),
                file.display().to_string().cyan(),
                broken.len()
            );
            for link in &broken {
                println!("      {} {} -> {}", "-".red(), link.text, link.target);
            }
            total += broken.len();
        }
    }

    if total > 0 {
        return Err(CliError::user(format!("{} broken links found", total)));
    }

    println!("{} All documentation links valid.", "OK".green().bold());
    Ok(())
}

fn markdown_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}
