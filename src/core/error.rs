//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// This enum encapsulates all possible errors that can occur during
/// core operations like category validation, directory walking and rendering.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The scan target does not exist. Surfaced before anything is written.
    #[error("directory {0:?} does not exist")]
    DirectoryNotFound(PathBuf),

    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents a failure while traversing the directory tree.
    #[error("error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Represents a failure writing to the output sink.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// One or more category IDs are not part of the exclusion catalog.
    #[error("invalid category IDs: {}. Use 'list-exclusions' to see valid IDs", .0.join(", "))]
    InvalidCategories(Vec<String>),
}

impl CoreError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        CoreError::Io(err, path.into())
    }
}
