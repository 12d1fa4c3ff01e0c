//! Remote access layer for mirrorkit
//!
//! Two concerns live here: resolving the bearer credential that every remote
//! request carries ([`auth`]), and the authenticated "list directory" /
//! "read file" operations against the remote content API ([`client`]).
//!
//! The sync engine talks to the remote exclusively through the
//! [`RemoteTree`] trait so tests can substitute an in-memory tree.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{Credential, CredentialProvider, EnvCredential, FileCredential, resolve_credential};
pub use client::{EntryKind, FileContent, GithubClient, RemoteTree, TreeEntry};
pub use error::{Error, Result};
