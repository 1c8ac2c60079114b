//! Markdown persistence errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing Markdown documents.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Failed to create the output directory.
    #[error("Failed to create output directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the document.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking write task panicked or was cancelled.
    #[error("Persist task failed: {0}")]
    Join(String),
}

impl PersistError {
    /// The underlying I/O error, if this failure came from the filesystem.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            PersistError::CreateDir { source, .. } | PersistError::Write { source, .. } => {
                Some(source)
            }
            PersistError::Join(_) => None,
        }
    }
}
