use std::path::PathBuf;

use thiserror::Error;

use times_core::CoreError;

/// Errors raised while writing summaries.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created.
    #[error("failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Summary could not be converted to a frame.
    #[error(transparent)]
    Frame(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
