use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for git-calver operations
#[derive(Error, Debug)]
pub enum CalverError {
    #[error("Not a git repository: {}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Cannot resolve revision '{0}'")]
    UnresolvedRevision(String),

    #[error("Revision '{rev}' points to a {kind}, not a commit")]
    NotACommit { rev: String, kind: String },

    #[error("Invalid year: '{0}'")]
    InvalidYear(String),

    #[error("Invalid inverse version: {0}")]
    InvalidInverseVersion(String),

    #[error("No commit matches version '{0}'")]
    NoMatch(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Commit {oid} has an out-of-range timestamp: {seconds}")]
    Timestamp { oid: git2::Oid, seconds: i64 },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-calver
pub type Result<T> = std::result::Result<T, CalverError>;

impl CalverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CalverError::Config(msg.into())
    }

    /// Create an inverse version error with context
    pub fn inverse(msg: impl Into<String>) -> Self {
        CalverError::InvalidInverseVersion(msg.into())
    }

    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        CalverError::Usage(msg.into())
    }
}
