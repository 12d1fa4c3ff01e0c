//! Local materialization of remote file content
//!
//! The [`Materializer`] owns a destination root and writes fetched file
//! bytes beneath it, creating directories on demand and returning the
//! content checksum of every write. Writes are unconditional: the remote
//! copy always wins and no backup of a previous version is kept.

use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::compute_checksum;
use crate::io::write_atomic;
use crate::{Error, Result};

/// Writes remote file content beneath a local destination root.
#[derive(Debug, Clone)]
pub struct Materializer {
    root: PathBuf,
}

impl Materializer {
    /// Create a materializer rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The destination root all relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path against the destination root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Ensure a directory exists beneath the root. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self, relative: &Path) -> Result<()> {
        let path = self.resolve(relative);
        fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        Ok(())
    }

    /// Write file bytes beneath the root, overwriting any existing file.
    ///
    /// Parent directories are created as needed. Returns the checksum of
    /// the bytes actually written, in the canonical `sha256:<hex>` form.
    ///
    /// # Errors
    ///
    /// Returns an error on filesystem permission or space failures; callers
    /// treat this as a per-file failure, not a run-aborting one.
    pub fn write(&self, relative: &Path, bytes: &[u8]) -> Result<String> {
        let path = self.resolve(relative);
        write_atomic(&path, bytes)?;
        tracing::debug!(path = %path.display(), "materialized file");
        Ok(compute_checksum(bytes))
    }
}
