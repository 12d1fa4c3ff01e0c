//! SHA-256 checksum utilities
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used to stamp
//! provenance into the sync manifest. Checksums are recomputed on every write
//! and never used for change detection.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of a byte buffer.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_checksum(&content))
}
