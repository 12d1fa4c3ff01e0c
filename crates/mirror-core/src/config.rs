//! Mirror configuration parsing (mirror.toml)
//!
//! The configuration fixes the source identity and the set of sync roots
//! for a run. Roots are immutable once the run starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_branch() -> String {
    "main".to_string()
}

fn default_output_dir() -> String {
    "instructions".to_string()
}

fn default_manifest_path() -> String {
    ".mirror-manifest.json".to_string()
}

/// Identity of the remote repository being mirrored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceIdentity {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

/// One remote path mapped to a local destination, relative to the
/// configured output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncRoot {
    /// Remote path from the repository root.
    pub remote: String,
    /// Local directory name beneath the output directory. Defaults to the
    /// last component of the remote path.
    #[serde(default)]
    pub local: Option<String>,
}

impl SyncRoot {
    /// The local directory this root materializes into.
    pub fn local_name(&self) -> &str {
        match &self.local {
            Some(name) => name,
            None => self
                .remote
                .rsplit('/')
                .next()
                .unwrap_or(self.remote.as_str()),
        }
    }
}

/// Parsed mirror.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub source: SourceIdentity,

    /// The fixed set of remote paths to mirror.
    #[serde(default)]
    pub roots: Vec<SyncRoot>,

    /// Destination directory for mirrored content.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Location of the JSON manifest record.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
}

impl MirrorConfig {
    /// Parse a configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or names no sync roots.
    pub fn parse(content: &str) -> Result<Self> {
        let config: MirrorConfig = toml::from_str(content)?;
        if config.roots.is_empty() {
            return Err(Error::InvalidConfig {
                message: "no [[roots]] configured".to_string(),
            });
        }
        Ok(config)
    }

    /// Load a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
