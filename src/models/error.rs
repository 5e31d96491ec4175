use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the metadata store.
///
/// Missing snippets or tags are not errors; lookups return `None` and
/// mutations on absent records are no-ops.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt metadata document {}: {source}", .path.display())]
    CorruptDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode metadata document {}: {source}", .path.display())]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write artifact {}: {source}", .path.display())]
    ArtifactWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Short label used by the status line
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::StorageUnavailable { .. } => "storage unavailable",
            StoreError::CorruptDocument { .. } => "corrupt document",
            StoreError::EncodeFailed { .. } => "encode failed",
            StoreError::ArtifactWriteFailed { .. } => "artifact write failed",
        }
    }
}
