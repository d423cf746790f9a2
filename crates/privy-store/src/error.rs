//! Store error type.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors from reading or rewriting the map file.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure at `path`.
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The file at `path` is not a valid map array, or a map failed to
    /// serialize.
    Json {
        /// The store file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// No stored map has this id.
    NotFound {
        /// The requested id.
        id: u32,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::NotFound { id } => write!(f, "no stored map with ID {id}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}
