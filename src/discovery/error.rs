use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a discovery run for one repository.
///
/// Per-file problems never surface here; they become
/// [`Diagnostic`](super::Diagnostic)s on the report instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Repository path does not exist: {0:?}")]
    RootNotFound(PathBuf),

    #[error("Repository path is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Failed to canonicalize repository path {path:?}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Discovery task for {path:?} did not complete: {message}")]
    TaskFailed { path: PathBuf, message: String },
}
