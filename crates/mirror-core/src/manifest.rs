//! Persisted record of the last sync run
//!
//! A single JSON file, fully overwritten each run (no history). Loading is
//! tolerant: a missing or malformed manifest is treated as "no prior
//! record," never as a reason to abort a sync.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mirror_fs::io::write_atomic;

use crate::config::SourceIdentity;
use crate::stats::RunStats;
use crate::Result;

/// Schema version of the manifest file.
pub const MANIFEST_FORMAT_VERSION: &str = "1.1.0";

/// Snapshot of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    pub format_version: String,
    pub last_sync_timestamp: DateTime<Utc>,
    pub source_identity: SourceIdentity,
    pub stats: RunStats,
}

impl ManifestRecord {
    /// Build a record for a run that just finished.
    pub fn new(source: SourceIdentity, stats: RunStats) -> Self {
        Self {
            format_version: MANIFEST_FORMAT_VERSION.to_string(),
            last_sync_timestamp: Utc::now(),
            source_identity: source,
            stats,
        }
    }
}

/// Loads and saves the single manifest file.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the prior record, if any.
    ///
    /// A missing file or malformed content both yield `None`.
    pub fn load(&self) -> Option<ManifestRecord> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "manifest is unreadable, ignoring: {}", e);
                None
            }
        }
    }

    /// Overwrite the manifest atomically (write-then-rename).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, record: &ManifestRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        write_atomic(&self.path, json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "manifest saved");
        Ok(())
    }
}
