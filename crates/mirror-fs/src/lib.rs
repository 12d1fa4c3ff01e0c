//! Filesystem layer for mirrorkit
//!
//! Provides atomic file IO, content checksums, and the [`Materializer`]
//! used by the sync engine to mirror remote files onto local disk.

pub mod checksum;
pub mod error;
pub mod io;
pub mod materialize;

pub use error::{Error, Result};
pub use materialize::Materializer;
