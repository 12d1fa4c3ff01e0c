//! SyncEngine implementation
//!
//! Traverses the configured remote roots with an explicit worklist and
//! materializes every file beneath them. The remote tree may be arbitrarily
//! deep and is not assumed stable between calls; remote paths lengthen
//! monotonically, so no cycle guard is needed.
//!
//! Failure isolation: a failed listing abandons that directory (one failure
//! unit — the file count beneath it is unknowable) without touching its
//! siblings; a failed fetch or write affects only that file.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use mirror_fs::Materializer;
use mirror_remote::{EntryKind, RemoteTree, TreeEntry};

use crate::config::{MirrorConfig, SyncRoot};
use crate::manifest::{ManifestRecord, ManifestStore};
use crate::stats::RunStats;
use crate::Result;

/// One per-unit failure absorbed into the run.
#[derive(Debug, Clone)]
pub struct Failure {
    /// Remote path of the unit that failed (a file, or a directory whose
    /// listing failed).
    pub path: String,
    pub reason: String,
}

/// Outcome of one sync invocation.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub stats: RunStats,
    pub failures: Vec<Failure>,
}

/// One pending directory-listing task.
struct DirJob {
    remote: String,
    /// Destination directory, relative to the materializer root.
    local: PathBuf,
}

/// Engine for mirroring remote content trees into local storage.
pub struct SyncEngine {
    remote: Box<dyn RemoteTree>,
    materializer: Materializer,
    roots: Vec<SyncRoot>,
}

impl SyncEngine {
    /// Create an engine over a remote tree.
    ///
    /// `output_dir` is the local destination root; each configured sync
    /// root becomes one subdirectory beneath it.
    pub fn new(
        remote: Box<dyn RemoteTree>,
        output_dir: impl Into<PathBuf>,
        roots: Vec<SyncRoot>,
    ) -> Self {
        Self {
            remote,
            materializer: Materializer::new(output_dir),
            roots,
        }
    }

    /// Run the full traversal.
    ///
    /// Never fails as a whole: every per-unit error is absorbed into the
    /// report. Re-running against an unchanged remote yields byte-identical
    /// local files.
    pub fn run(&self) -> SyncReport {
        let mut stats = RunStats::new();
        let mut failures = Vec::new();

        let mut queue: VecDeque<DirJob> = self
            .roots
            .iter()
            .map(|root| DirJob {
                remote: root.remote.clone(),
                local: PathBuf::from(root.local_name()),
            })
            .collect();

        while let Some(job) = queue.pop_front() {
            if let Err(e) = self.materializer.ensure_dir(&job.local) {
                tracing::warn!(path = %job.remote, "could not create destination: {}", e);
                stats.record_failure();
                failures.push(Failure {
                    path: job.remote,
                    reason: e.to_string(),
                });
                continue;
            }

            let entries = match self.remote.list_dir(&job.remote) {
                Ok(entries) => entries,
                Err(e) => {
                    // One failure unit for the whole unlisted subtree.
                    tracing::warn!(path = %job.remote, "listing failed: {}", e);
                    stats.record_failure();
                    failures.push(Failure {
                        path: job.remote,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            for entry in entries {
                match &entry.kind {
                    EntryKind::Dir => {
                        queue.push_back(DirJob {
                            remote: entry.path,
                            local: job.local.join(&entry.name),
                        });
                    }
                    EntryKind::File => match self.fetch_and_write(&entry, &job.local) {
                        Ok(checksum) => {
                            tracing::debug!(path = %entry.path, %checksum, "downloaded");
                            stats.record_download();
                        }
                        Err(e) => {
                            tracing::warn!(path = %entry.path, "download failed: {}", e);
                            stats.record_failure();
                            failures.push(Failure {
                                path: entry.path,
                                reason: e.to_string(),
                            });
                        }
                    },
                    EntryKind::Other(kind) => {
                        tracing::debug!(path = %entry.path, kind = %kind, "skipping unsupported entry");
                        stats.record_skip();
                    }
                }
            }
        }

        SyncReport { stats, failures }
    }

    /// Fetch one file, decode it, and materialize it locally.
    fn fetch_and_write(&self, entry: &TreeEntry, local_dir: &Path) -> Result<String> {
        let content = self.remote.fetch_file(&entry.path)?;
        let checksum = self
            .materializer
            .write(&local_dir.join(&entry.name), &content.bytes)?;
        Ok(checksum)
    }
}

/// Run a complete sync: verify the credential, traverse every configured
/// root, and persist the manifest record.
///
/// # Errors
///
/// Fails only on startup-level problems (the verification call being
/// rejected or the remote unreachable) or if the final manifest save fails.
/// Per-unit traversal errors are absorbed into the returned report.
pub fn run_sync(config: &MirrorConfig, remote: Box<dyn RemoteTree>) -> Result<SyncReport> {
    remote.verify()?;

    let engine = SyncEngine::new(remote, &config.output_dir, config.roots.clone());
    let report = engine.run();

    let record = ManifestRecord::new(config.source.clone(), report.stats.clone());
    ManifestStore::new(&config.manifest_path).save(&record)?;

    tracing::debug!(
        downloaded = report.stats.downloaded,
        skipped = report.stats.skipped,
        failed = report.stats.failed,
        "sync complete"
    );
    Ok(report)
}
