//! Error taxonomy shared by the index, the metadata cache and persistence.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    /// A directory (or file) key is not present in the index.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The duration probe could not read the media.
    #[error("failed to read duration of {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// Reading or writing the filesystem failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted state exists but could not be understood.
    #[error("state file {} is corrupt: {reason}", path.display())]
    PersistenceCorrupt { path: PathBuf, reason: String },

    /// The index could not be encoded for saving.
    #[error("failed to serialize state for {}: {reason}", path.display())]
    Serialize { path: PathBuf, reason: String },

    /// A path given as a library root is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// A directory holds more files than a listing may show.
    #[error("{} has too many items to display at once ({count} > {limit})", path.display())]
    TooManyFiles {
        path: PathBuf,
        count: usize,
        limit: usize,
    },
}

impl ShelfError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
