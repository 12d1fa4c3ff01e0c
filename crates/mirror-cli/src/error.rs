//! Error types for mirror-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mirror-core
    #[error(transparent)]
    Core(#[from] mirror_core::Error),

    /// Error from mirror-remote
    #[error(transparent)]
    Remote(#[from] mirror_remote::Error),

    /// Error from mirror-tools
    #[error(transparent)]
    Tools(#[from] mirror_tools::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
