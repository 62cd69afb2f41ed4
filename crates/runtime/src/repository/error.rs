//! Error types raised by repository implementations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("commit repository lock was poisoned")]
    LockPoisoned,

    #[error("commit store I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode commit record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RepositoryError {
    /// Map an I/O error raised while touching `path`.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
