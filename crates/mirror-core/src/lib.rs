//! Core orchestration layer for mirrorkit
//!
//! Coordinates the remote tree client and the local materializer:
//!
//! - **Configuration**: the source identity and the fixed set of sync roots
//! - **SyncEngine**: worklist traversal of the remote tree with per-unit
//!   failure isolation
//! - **RunStats**: downloaded/skipped/failed accounting for one invocation
//! - **ManifestStore**: the persisted record of the last run
//!
//! `mirror-core` sits above `mirror-fs` and `mirror-remote` and below the
//! CLI:
//!
//! ```text
//!          CLI
//!           |
//!      mirror-core
//!        |      |
//!  mirror-fs  mirror-remote
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod stats;

pub use config::{MirrorConfig, SourceIdentity, SyncRoot};
pub use engine::{Failure, SyncEngine, SyncReport, run_sync};
pub use error::{Error, Result};
pub use manifest::{MANIFEST_FORMAT_VERSION, ManifestRecord, ManifestStore};
pub use stats::RunStats;
