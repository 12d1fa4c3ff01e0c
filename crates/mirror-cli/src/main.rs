//! mirrorkit CLI
//!
//! The command-line interface for mirroring curated remote content and
//! maintaining the local content tree.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Sync { config, token_file } => commands::run_sync(&config, token_file.as_deref()),
        Commands::CheckLinks { paths } => commands::run_check_links(&paths),
        Commands::ConvertRoles { source, out } => commands::run_convert_roles(&source, &out),
        Commands::UpdateCatalog {
            catalog,
            agents_dir,
            commands_dir,
        } => commands::run_update_catalog(&catalog, &agents_dir, &commands_dir),
    }
}
