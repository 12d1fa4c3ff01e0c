//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file was found but is incomplete
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // Transparent wrappers for underlying crate errors
    /// Remote access error from mirror-remote
    #[error(transparent)]
    Remote(#[from] mirror_remote::Error),

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
