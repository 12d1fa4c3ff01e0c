//! Content maintenance tools for mirrorkit
//!
//! Small I/O wrappers that live alongside the mirror: a markdown link
//! validator, a YAML-frontmatter role-to-agent converter, and a catalog
//! regenerator that lists local markdown basenames. None of these carry a
//! state machine or concurrency concerns.

pub mod catalog;
pub mod error;
pub mod frontmatter;
pub mod links;

pub use catalog::{CatalogUpdate, update_catalog};
pub use error::{Error, Result};
pub use frontmatter::{AgentFrontmatter, ConvertReport, convert_dir, validate};
pub use links::{BrokenLink, check_file};
