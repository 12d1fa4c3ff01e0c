//! Error types for mirror-remote

/// Result type for mirror-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-remote operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No credential source yielded a value. Configuration error, not
    /// transient: never retried.
    #[error("no credential found; tried: {tried}")]
    MissingCredential { tried: String },

    /// The remote rejected the credential (401/403-class status).
    #[error("authentication rejected (HTTP {status}): {detail}")]
    AuthRejected { status: u16, detail: String },

    /// Non-2xx status outside the auth class. Local to the call that
    /// produced it; siblings are unaffected.
    #[error("remote unavailable for {path} (HTTP {status}): {detail}")]
    RemoteUnavailable {
        path: String,
        status: u16,
        detail: String,
    },

    /// Transport-level failure, timeouts included.
    #[error("transport error for {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response arrived but could not be decoded (malformed JSON, bad
    /// transport encoding).
    #[error("could not decode response for {path}: {detail}")]
    Decode { path: String, detail: String },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl Error {
    /// Whether this error is fatal to the whole run rather than local to
    /// one listing or fetch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::MissingCredential { .. } | Error::AuthRejected { .. } | Error::ClientBuild(_)
        )
    }
}
