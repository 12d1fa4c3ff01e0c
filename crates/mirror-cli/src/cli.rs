//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// mirrorkit - Mirror curated remote content into local storage
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Mirror the configured remote roots into local storage
    ///
    /// Requires a bearer credential from MIRROR_GITHUB_TOKEN, GITHUB_TOKEN,
    /// or the token file. Exits 0 when the traversal completes, even if
    /// some files failed; failures are listed in the summary.
    Sync {
        /// Path to the mirror configuration file
        #[arg(short, long, default_value = "mirror.toml")]
        config: PathBuf,

        /// Token file consulted after the environment variables
        #[arg(long)]
        token_file: Option<PathBuf>,
    },

    /// Validate local links in markdown files
    ///
    /// Exits non-zero if any broken link is found.
    CheckLinks {
        /// Files to check; defaults to the *.md files in the current directory
        paths: Vec<PathBuf>,
    },

    /// Convert role documents into agent documents with YAML frontmatter
    ConvertRoles {
        /// Directory containing role *.md files
        source: PathBuf,

        /// Output directory for converted agents
        #[arg(short, long, default_value = "agents")]
        out: PathBuf,
    },

    /// Regenerate the catalog from the local agents and commands directories
    UpdateCatalog {
        /// Catalog JSON file to rewrite in place
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Directory scanned for agent markdown files
        #[arg(long, default_value = "agents")]
        agents_dir: PathBuf,

        /// Directory scanned for command markdown files
        #[arg(long, default_value = "commands")]
        commands_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_defaults() {
        let cli = Cli::parse_from(["mirror", "sync"]);
        match cli.command {
            Commands::Sync { config, token_file } => {
                assert_eq!(config, PathBuf::from("mirror.toml"));
                assert!(token_file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["mirror", "check-links", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn update_catalog_accepts_overrides() {
        let cli = Cli::parse_from([
            "mirror",
            "update-catalog",
            "--catalog",
            "plugin.json",
            "--agents-dir",
            "a",
        ]);
        match cli.command {
            Commands::UpdateCatalog {
                catalog,
                agents_dir,
                commands_dir,
            } => {
                assert_eq!(catalog, PathBuf::from("plugin.json"));
                assert_eq!(agents_dir, PathBuf::from("a"));
                assert_eq!(commands_dir, PathBuf::from("commands"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
