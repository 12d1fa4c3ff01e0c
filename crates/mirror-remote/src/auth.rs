//! Bearer credential resolution
//!
//! Credential sources are an ordered list of providers tried in sequence;
//! the first non-empty value wins. Absence is a configuration error that
//! fails closed before any network call is made.

use std::fmt;
use std::path::PathBuf;

use crate::{Error, Result};

/// Default environment variable consulted for the credential.
pub const DEFAULT_ENV_VAR: &str = "MIRROR_GITHUB_TOKEN";

/// Fallback environment variable, honored for compatibility with CI setups.
pub const FALLBACK_ENV_VAR: &str = "GITHUB_TOKEN";

/// Default token file name, resolved against the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".mirror-token";

/// An opaque bearer credential.
///
/// The value is never logged; `Debug` output is redacted.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// One source a bearer credential may come from.
pub trait CredentialProvider {
    /// Human-readable description of the source, used in error messages.
    fn describe(&self) -> String;

    /// Attempt to produce a credential. `None` means this source has
    /// nothing; resolution moves on to the next provider.
    fn resolve(&self) -> Option<String>;
}

/// Reads the credential from a process environment variable.
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }

    fn resolve(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the credential from a local plaintext file, trimmed.
pub struct FileCredential {
    path: PathBuf,
}

impl FileCredential {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for FileCredential {
    fn describe(&self) -> String {
        format!("token file {}", self.path.display())
    }

    fn resolve(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// The default provider chain: primary env var, fallback env var, token file.
pub fn default_providers(token_file: PathBuf) -> Vec<Box<dyn CredentialProvider>> {
    vec![
        Box::new(EnvCredential::new(DEFAULT_ENV_VAR)),
        Box::new(EnvCredential::new(FALLBACK_ENV_VAR)),
        Box::new(FileCredential::new(token_file)),
    ]
}

/// Resolve a credential from an ordered provider list.
///
/// # Errors
///
/// Returns [`Error::MissingCredential`] naming every source tried when no
/// provider yields a non-empty value.
pub fn resolve_credential(providers: &[Box<dyn CredentialProvider>]) -> Result<Credential> {
    for provider in providers {
        if let Some(value) = provider.resolve() {
            tracing::debug!(source = %provider.describe(), "resolved credential");
            return Ok(Credential::new(value));
        }
    }

    let tried = providers
        .iter()
        .map(|p| p.describe())
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::MissingCredential { tried })
}
