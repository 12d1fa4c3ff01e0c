//! Sync command implementation
//!
//! Resolves the credential, verifies remote access, runs the traversal, and
//! prints the summary. Per-file failures are reported but do not fail the
//! command; only startup-level problems (missing credential, rejected
//! authentication, unreadable config) exit non-zero.

use std::path::Path;

use colored::Colorize;

use mirror_core::{ManifestStore, MirrorConfig};
use mirror_remote::auth::{DEFAULT_TOKEN_FILE, default_providers, resolve_credential};
use mirror_remote::{Error as RemoteError, GithubClient};

use crate::error::{CliError, Result};

/// Run the sync command.
pub fn run_sync(config_path: &Path, token_file: Option<&Path>) -> Result<()> {
    let config = MirrorConfig::load(config_path)?;

    let token_file = token_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| DEFAULT_TOKEN_FILE.into());
    let providers = default_providers(token_file);
    let credential = resolve_credential(&providers).map_err(|e| match e {
        RemoteError::MissingCredential { tried } => CliError::user(format!(
            "no credential found (tried: {}).\n\
             Set MIRROR_GITHUB_TOKEN or create a token file; the token needs \
             read access to {}/{}",
            tried, config.source.owner, config.source.repo
        )),
        other => CliError::Remote(other),
    })?;

    println!(
        "{} Syncing {}/{} at {}",
        "=>".blue().bold(),
        config.source.owner.cyan(),
        config.source.repo.cyan(),
        config.source.branch.dimmed()
    );

    // Prior record is diagnostic only; it is never merged into the new run.
    if let Some(prior) = ManifestStore::new(&config.manifest_path).load() {
        println!(
            "   last sync: {} ({} downloaded, {} failed)",
            prior.last_sync_timestamp.to_rfc3339().dimmed(),
            prior.stats.downloaded,
            prior.stats.failed
        );
    }

    let client = GithubClient::new(
        config.source.owner.clone(),
        config.source.repo.clone(),
        config.source.branch.clone(),
        credential,
    )?;

    let report = mirror_core::run_sync(&config, Box::new(client))?;

    println!("{} Sync complete:", "OK".green().bold());
    println!("   {} {} downloaded", "+".green(), report.stats.downloaded);
    println!("   {} {} skipped", "-".yellow(), report.stats.skipped);
    println!("   {} {} failed", "!".red(), report.stats.failed);

    if !report.failures.is_empty() {
        println!();
        println!("{} Some units failed:", "WARN".yellow().bold());
        for failure in &report.failures {
            println!("   {} {}: {}", "!".red(), failure.path.cyan(), failure.reason);
        }
    }

    println!();
    println!(
        "Content in {}, manifest in {}.",
        config.output_dir.cyan(),
        config.manifest_path.cyan()
    );

    Ok(())
}
