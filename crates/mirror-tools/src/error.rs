//! Error types for mirror-tools

use std::path::PathBuf;

/// Result type for mirror-tools operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-tools operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no YAML frontmatter block found")]
    MissingFrontmatter,

    #[error("frontmatter is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("duplicate frontmatter block detected")]
    DuplicateFrontmatter,

    #[error("catalog at {path} is not a JSON object")]
    MalformedCatalog { path: PathBuf },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// YAML (de)serialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
