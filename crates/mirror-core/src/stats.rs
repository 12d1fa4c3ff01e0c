//! Per-run sync accounting
//!
//! Counters are owned exclusively by the engine for the run's duration and
//! read-only once the run ends. The `failed` counter is deliberately
//! coarse: one unit per failed file fetch or write, and also one unit per
//! failed directory listing — the number of files under an unlisted
//! directory is unknowable and must not be assumed to be zero.

use serde::{Deserialize, Serialize};

/// Counters for one sync invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub downloaded: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_download(&mut self) {
        self.downloaded += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Total units accounted for in this run.
    pub fn files_accounted(&self) -> u64 {
        self.downloaded + self.skipped + self.failed
    }
}
